//! Pinyin tone algebra: stripping, regenerating and numbering tone marks

use unicode_normalization::UnicodeNormalization;

/// Vowels in the order they are considered for carrying the tone mark
const VOWEL_PRIORITY: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

/// Tone 1-4 forms of each vowel in `VOWEL_PRIORITY`
const TONE_MARKS: [[char; 4]; 6] = [
    ['ā', 'á', 'ǎ', 'à'],
    ['ē', 'é', 'ě', 'è'],
    ['ī', 'í', 'ǐ', 'ì'],
    ['ō', 'ó', 'ǒ', 'ò'],
    ['ū', 'ú', 'ǔ', 'ù'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
];

/// Combining macron, acute, caron and grave. The diaeresis on ü is not a tone.
fn is_tone_mark(c: char) -> bool {
    matches!(c, '\u{0304}' | '\u{0301}' | '\u{030C}' | '\u{0300}')
}

/// Remove tone diacritics, leaving the segmental skeleton ("nǚ" -> "nü")
pub fn strip_tones(pinyin: &str) -> String {
    pinyin.nfd().filter(|c| !is_tone_mark(*c)).nfc().collect()
}

/// The four tone-marked renderings of a syllable.
///
/// The tone goes on the first vowel found in the order a, e, i, o, u, ü.
/// Without any such vowel the input is returned four times unchanged.
pub fn tone_variants(syllable: &str) -> [String; 4] {
    let skeleton = strip_tones(syllable);

    let found = VOWEL_PRIORITY
        .iter()
        .enumerate()
        .find_map(|(slot, &vowel)| skeleton.find(vowel).map(|pos| (slot, vowel, pos)));

    let Some((slot, vowel, pos)) = found else {
        return std::array::from_fn(|_| syllable.to_string());
    };

    let (head, rest) = skeleton.split_at(pos);
    let tail = &rest[vowel.len_utf8()..];
    TONE_MARKS[slot].map(|marked| format!("{head}{marked}{tail}"))
}

/// Tone number (1-4) of the first tone-marked vowel, `None` for neutral tone
pub fn tone_of(syllable: &str) -> Option<u8> {
    syllable.chars().find_map(|c| marked_vowel(c).map(|(_, tone)| tone))
}

/// Convert tone marks to trailing digits per vowel: "nǐ hǎo" -> "ni3 ha3o"
pub fn to_numbered(pinyin: &str) -> String {
    let mut out = String::with_capacity(pinyin.len() + 4);
    for c in pinyin.nfc() {
        match marked_vowel(c) {
            Some((base, tone)) => {
                out.push(base);
                out.push(char::from(b'0' + tone));
            }
            None => out.push(c),
        }
    }
    out
}

fn marked_vowel(c: char) -> Option<(char, u8)> {
    TONE_MARKS.iter().enumerate().find_map(|(slot, marks)| {
        marks
            .iter()
            .position(|&m| m == c)
            .map(|tone| (VOWEL_PRIORITY[slot], tone as u8 + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ma_has_four_tones() {
        let variants: HashSet<String> = tone_variants("ma").into_iter().collect();
        let expected: HashSet<String> =
            ["mā", "má", "mǎ", "mà"].iter().map(|s| s.to_string()).collect();
        assert_eq!(variants, expected);
    }

    #[test]
    fn test_marked_input_is_stripped_first() {
        assert_eq!(tone_variants("xiè"), ["xiē", "xié", "xiě", "xiè"].map(String::from));
        assert_eq!(tone_variants("hǎo"), ["hāo", "háo", "hǎo", "hào"].map(String::from));
    }

    #[test]
    fn test_umlaut_survives_and_takes_the_tone() {
        assert_eq!(strip_tones("nǚ"), "nü");
        assert_eq!(tone_variants("nǚ"), ["nǖ", "nǘ", "nǚ", "nǜ"].map(String::from));
        // e outranks ü
        assert_eq!(tone_variants("lüè")[0], "lüē");
    }

    #[test]
    fn test_no_vowel_is_degenerate() {
        let variants = tone_variants("hm");
        assert!(variants.iter().all(|v| v == "hm"));
    }

    #[test]
    fn test_strip_tones_handles_decomposed_input() {
        assert_eq!(strip_tones("ma\u{030C}"), "ma");
        assert_eq!(strip_tones("Nǐ hǎo"), "Ni hao");
    }

    #[test]
    fn test_numbered_tones() {
        assert_eq!(to_numbered("nǐ hǎo"), "ni3 ha3o");
        assert_eq!(to_numbered("xièxie"), "xie4xie");
        assert_eq!(tone_of("zàijiàn"), Some(4));
        assert_eq!(tone_of("ma"), None);
    }
}
