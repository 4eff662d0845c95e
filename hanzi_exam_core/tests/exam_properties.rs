//! Property and scenario tests for exam generation.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hanzi_exam_core::{
    dedupe, generate_exam, parse_json_str, strip_tones, tone_of, tone_variants, Archetype,
    CorrectAnswer, DistractorGenerator, ExamAssembler, ExamConfig, Stratum, StratumWeight,
    VocabularyItem, VocabularyPool,
};

fn scenario_pool() -> VocabularyPool {
    VocabularyPool::from_items(vec![
        VocabularyItem::new("你好", "nǐ hǎo", "Hello"),
        VocabularyItem::new("谢谢", "xièxie", "Thank you"),
        VocabularyItem::new("再见", "zàijiàn", "Goodbye"),
        VocabularyItem::new("是", "shì", "to be"),
    ])
}

/// A lesson file shaped like the app's static data
fn lesson_pool() -> VocabularyPool {
    parse_json_str(
        r#"{
        "lesson1": [
            {"id": "1-1", "hanzi": "你", "pinyin": "nǐ", "english": "You",
             "example_sentence": {"hanzi": "你是学生吗？", "pinyin": "Nǐ shì xuéshēng ma?", "english": "Are you a student?"}},
            {"id": "1-2", "hanzi": "好", "pinyin": "hǎo", "english": "Good",
             "example_sentence": {"hanzi": "今天天气很好。", "pinyin": "Jīntiān tiānqì hěn hǎo.", "english": "The weather is good today."}},
            {"id": "1-3", "hanzi": "你好", "pinyin": "nǐ hǎo", "english": "Hello",
             "example_sentence": {"hanzi": "李老师，你好！", "pinyin": "Lǐ lǎoshī, nǐ hǎo!", "english": "Hello, Teacher Li!"}},
            {"id": "1-4", "hanzi": "一", "pinyin": "yī", "english": "One",
             "example_sentence": {"hanzi": "我有一本书。", "pinyin": "Wǒ yǒu yī běn shū.", "english": "I have one book."}},
            {"id": "1-5", "hanzi": "五", "pinyin": "wǔ", "english": "Five"}
        ],
        "lesson2": [
            {"id": "2-1", "hanzi": "学生", "pinyin": "xuéshēng", "english": "Student",
             "example_sentence": {"hanzi": "我是学生。", "pinyin": "Wǒ shì xuéshēng.", "english": "I am a student."}},
            {"id": "2-2", "hanzi": "老师", "pinyin": "lǎoshī", "english": "Teacher"},
            {"id": "2-3", "hanzi": "女", "pinyin": "nǚ", "english": "Female"},
            {"id": "2-4", "hanzi": "书", "pinyin": "shū", "english": "Book"},
            {"id": "2-5", "hanzi": "中国", "pinyin": "zhōngguó", "english": "China"}
        ]
    }"#,
    )
    .unwrap()
}

fn every_stratum() -> ExamConfig {
    ExamConfig {
        strata: vec![
            StratumWeight::new(Stratum::Recognition, 1),
            StratumWeight::new(Stratum::MultipleChoice, 1),
            StratumWeight::new(Stratum::ToneSelection, 1),
            StratumWeight::new(Stratum::Matching, 1),
            StratumWeight::new(Stratum::Translation, 1),
            StratumWeight::new(Stratum::CharacterComponent, 1),
            StratumWeight::new(Stratum::SentenceCompletion, 1),
        ],
        ..ExamConfig::default()
    }
}

#[test]
fn scenario_four_item_pool() {
    let pool = scenario_pool();
    let questions = generate_exam(&pool, 4).unwrap();

    assert_eq!(questions.len(), 4);
    for question in &questions {
        assert_eq!(question.options.len(), 4);
        assert!(question.has_distinct_options(), "{question:?}");
        if let CorrectAnswer::Single(answer) = &question.correct_answer {
            assert_eq!(question.options.iter().filter(|o| *o == answer).count(), 1);
        }
    }
}

#[test]
fn scenario_tone_variants_of_ma() {
    let variants: HashSet<String> = tone_variants("ma").into_iter().collect();
    let expected: HashSet<String> =
        ["mā", "má", "mǎ", "mà"].into_iter().map(String::from).collect();
    assert_eq!(variants, expected);
}

#[test]
fn scenario_translation_distractors() {
    let pool = lesson_pool();
    let target = pool.items().iter().find(|i| i.id == "2-1").unwrap();
    let others: Vec<&VocabularyItem> = pool.items().iter().filter(|i| i.id != "2-1").collect();

    let mut rng = StdRng::seed_from_u64(2024);
    let picked = DistractorGenerator::default().generate(
        target,
        "I am a student.",
        &others,
        Archetype::Translation,
        3,
        &mut rng,
    );

    assert_eq!(picked.len(), 3);
    assert!(picked.iter().all(|p| p != "I am a student."));
    let unique: HashSet<&String> = picked.iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn scenario_pool_tone_questions_have_one_right_tone() {
    let pool = scenario_pool();
    let config = ExamConfig {
        strata: vec![StratumWeight::new(Stratum::ToneSelection, 1)],
        ..ExamConfig::default()
    };
    let assembler = ExamAssembler::new(&pool, config).unwrap();

    for seed in 0..20 {
        for question in assembler.generate_with_rng(4, &mut StdRng::seed_from_u64(seed)) {
            let answer = question.correct_answer.as_single().unwrap();
            let same_tone: Vec<&str> = question
                .options
                .iter()
                .map(String::as_str)
                .filter(|o| tone_of(o) == tone_of(answer))
                .collect();
            assert_eq!(same_tone, vec![answer], "{question:?}");
        }
    }
}

#[test]
fn zero_count_gives_empty_exam() {
    assert!(generate_exam(&scenario_pool(), 0).unwrap().is_empty());
}

#[test]
fn every_archetype_appears_and_is_well_formed() {
    let pool = lesson_pool();
    let assembler = ExamAssembler::new(&pool, every_stratum()).unwrap();
    let questions = assembler.generate_with_rng(70, &mut StdRng::seed_from_u64(8));

    assert_eq!(questions.len(), 70);
    let seen: HashSet<Archetype> = questions.iter().map(|q| q.archetype).collect();
    for archetype in [
        Archetype::Recognition,
        Archetype::ToneSelection,
        Archetype::Matching,
        Archetype::Translation,
        Archetype::CharacterComponent,
        Archetype::SentenceCompletion,
    ] {
        assert!(seen.contains(&archetype), "missing {archetype:?}");
    }
    assert!(questions.iter().all(|q| q.is_well_formed(4)));
}

#[test]
fn matching_answers_pair_up_with_options() {
    let pool = lesson_pool();
    let config = ExamConfig {
        strata: vec![StratumWeight::new(Stratum::Matching, 1)],
        ..ExamConfig::default()
    };
    let assembler = ExamAssembler::new(&pool, config).unwrap();

    for question in assembler.generate_with_rng(10, &mut StdRng::seed_from_u64(3)) {
        let pairs = question.match_pairs.as_ref().unwrap();
        let column: Vec<String> = pairs.iter().map(|p| p.right.clone()).collect();
        assert_eq!(question.correct_answer, CorrectAnswer::Ordered(column.clone()));

        let mut options = question.options.clone();
        options.sort();
        let mut expected = column;
        expected.sort();
        assert_eq!(options, expected);
    }
}

#[test]
fn questions_serialize_in_camel_case() {
    let pool = scenario_pool();
    let config = ExamConfig {
        strata: vec![StratumWeight::new(Stratum::Matching, 1)],
        ..ExamConfig::default()
    };
    let assembler = ExamAssembler::new(&pool, config).unwrap();
    let questions = assembler.generate_with_rng(1, &mut StdRng::seed_from_u64(1));

    let json = serde_json::to_value(&questions[0]).unwrap();
    assert_eq!(json["archetype"], "matching");
    assert!(json["correctAnswer"].is_array());
    assert!(json["matchPairs"].is_array());
    assert!(json.get("hanzi").is_none());
}

proptest! {
    #[test]
    fn exam_has_requested_length_and_valid_questions(count in 0usize..60, seed in any::<u64>()) {
        let pool = lesson_pool();
        let assembler = ExamAssembler::new(&pool, every_stratum()).unwrap();
        let questions = assembler.generate_with_rng(count, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(questions.len(), count);
        for question in &questions {
            prop_assert!(question.is_well_formed(4), "{:?}", question);
        }
        let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn tone_options_share_the_answer_skeleton(seed in any::<u64>()) {
        let pool = lesson_pool();
        let config = ExamConfig {
            strata: vec![StratumWeight::new(Stratum::ToneSelection, 1)],
            ..ExamConfig::default()
        };
        let assembler = ExamAssembler::new(&pool, config).unwrap();

        for question in assembler.generate_with_rng(10, &mut StdRng::seed_from_u64(seed)) {
            let answer = question.correct_answer.as_single().unwrap().to_string();
            let skeleton = strip_tones(&answer);
            for option in &question.options {
                prop_assert_eq!(strip_tones(option), skeleton.clone());
            }
            let same_tone = question
                .options
                .iter()
                .filter(|o| tone_of(o) == tone_of(&answer))
                .count();
            prop_assert_eq!(same_tone, 1, "{:?}", question);
        }
    }

    #[test]
    fn tone_regeneration_keeps_skeleton(syllable in "[bcdfghjklmnpqrstwxyz]{0,2}[aeiouü]{1,3}n?g?") {
        for variant in tone_variants(&syllable) {
            prop_assert_eq!(strip_tones(&variant), strip_tones(&syllable));
        }
    }

    #[test]
    fn dedupe_is_idempotent(options in prop::collection::vec("[a-c]{1,2}", 4), answer_slot in 0usize..4) {
        let pool = scenario_pool();
        let assembler = ExamAssembler::new(&pool, ExamConfig::default()).unwrap();
        let mut question = assembler.generate_with_rng(1, &mut StdRng::seed_from_u64(0)).remove(0);
        question.correct_answer = CorrectAnswer::Single(options[answer_slot].clone());
        question.options = options;
        question.match_pairs = None;

        let once = dedupe(question);
        prop_assert!(once.has_distinct_options());
        prop_assert_eq!(once.options.len(), 4);
        let twice = dedupe(once.clone());
        prop_assert_eq!(once, twice);
    }
}
