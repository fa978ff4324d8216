use indoc::indoc;
use proptest::prelude::*;
use songcodec::{ClearGrade, ConditionKind, RatingClass, UnlockCondition, UnlockEntry};

fn all_condition_shapes() -> Vec<UnlockCondition> {
    vec![
        UnlockCondition::Fragment { credit: 100 },
        UnlockCondition::ClearSong {
            song_id: "grievouslady".to_string(),
            song_difficulty: 2,
            grade: ClearGrade::A,
        },
        UnlockCondition::PlaySong {
            song_id: "fractureray".to_string(),
            song_difficulty: 2,
        },
        UnlockCondition::ClearSongMultiple {
            song_id: "tempestissimo".to_string(),
            song_difficulty: 3,
            grade: ClearGrade::Ex,
            times: 3,
        },
        UnlockCondition::Choice {
            conditions: vec![
                UnlockCondition::Fragment { credit: 500 },
                UnlockCondition::Potential { rating: 1100 },
            ],
        },
        UnlockCondition::Potential { rating: 1250 },
        UnlockCondition::ClearRatingMultiple {
            rating: 10,
            times: 5,
        },
        UnlockCondition::Special,
        UnlockCondition::Character { character_id: 35 },
        UnlockCondition::Story {
            story_id: "6-7".to_string(),
        },
        UnlockCondition::CharacterForm {
            character_id: 21,
            form: 1,
        },
        UnlockCondition::DifficultyConfig {
            rating_class: RatingClass::Beyond,
        },
    ]
}

#[test]
fn every_variant_roundtrips_exactly() {
    for condition in all_condition_shapes() {
        let encoded = serde_json::to_string(&condition).expect("encode condition");
        let decoded: UnlockCondition =
            serde_json::from_str(&encoded).expect("decode encoded condition");
        assert_eq!(decoded, condition, "roundtrip failed for {:?}", condition);
    }
}

#[test]
fn encoded_discriminant_reselects_the_same_variant() {
    for condition in all_condition_shapes() {
        let value = serde_json::to_value(&condition).expect("encode condition");
        assert_eq!(
            value["type"],
            serde_json::json!(condition.kind().code()),
            "wrong discriminant for {:?}",
            condition
        );
    }
}

#[test]
fn unknown_discriminant_fails_decoding() {
    let error = serde_json::from_str::<UnlockCondition>(r#"{"type": 999}"#).unwrap_err();
    assert!(error.to_string().contains("999"));
}

#[test]
fn discriminant_gap_values_fail_decoding() {
    for code in [7, 42, 100, 102, 107] {
        let raw = format!(r#"{{"type": {}}}"#, code);
        assert!(
            serde_json::from_str::<UnlockCondition>(&raw).is_err(),
            "code {} must not decode",
            code
        );
    }
}

#[test]
fn missing_discriminant_fails_decoding() {
    let error = serde_json::from_str::<UnlockCondition>(r#"{"credit": 100}"#).unwrap_err();
    assert!(error.to_string().contains("type"));
}

#[test]
fn non_object_input_fails_decoding() {
    assert!(serde_json::from_str::<UnlockCondition>("3").is_err());
    assert!(serde_json::from_str::<UnlockCondition>("[1, 2]").is_err());
}

#[test]
fn unknown_payload_fields_are_ignored() {
    let decoded: UnlockCondition =
        serde_json::from_str(r#"{"type": 5, "rating": 1000, "legacy_flag": true}"#).unwrap();
    assert_eq!(decoded, UnlockCondition::Potential { rating: 1000 });
}

#[test]
fn missing_payload_fields_decode_to_defaults() {
    let decoded: UnlockCondition = serde_json::from_str(r#"{"type": 1}"#).unwrap();
    assert_eq!(
        decoded,
        UnlockCondition::ClearSong {
            song_id: String::new(),
            song_difficulty: 0,
            grade: ClearGrade::Any,
        }
    );
}

#[test]
fn nested_choice_conditions_roundtrip() {
    let raw = indoc! {r#"
        {
            "type": 4,
            "conditions": [
                { "type": 0, "credit": 100 },
                {
                    "type": 4,
                    "conditions": [ { "type": 101 } ]
                }
            ]
        }
    "#};

    let decoded: UnlockCondition = serde_json::from_str(raw).unwrap();
    let UnlockCondition::Choice { conditions } = &decoded else {
        panic!("expected a choice condition");
    };
    assert_eq!(conditions.len(), 2);
    assert_eq!(
        conditions[1],
        UnlockCondition::Choice {
            conditions: vec![UnlockCondition::Special],
        }
    );

    let encoded = serde_json::to_string(&decoded).unwrap();
    let again: UnlockCondition = serde_json::from_str(&encoded).unwrap();
    assert_eq!(again, decoded);
}

#[test]
fn unlock_entry_decodes_from_manifest_shape() {
    let raw = indoc! {r#"
        {
            "songId": "tempestissimo",
            "ratingClass": 3,
            "conditions": [
                {
                    "type": 3,
                    "song_id": "grievouslady",
                    "song_difficulty": 2,
                    "grade": 3,
                    "times": 3
                },
                { "type": 5, "rating": 1100 }
            ]
        }
    "#};

    let entry: UnlockEntry = serde_json::from_str(raw).unwrap();
    assert_eq!(entry.song_id, "tempestissimo");
    assert_eq!(entry.rating_class, RatingClass::Beyond);
    assert_eq!(entry.conditions.len(), 2);
    assert_eq!(entry.conditions[0].kind(), ConditionKind::ClearSongMultiple);
    assert_eq!(entry.conditions[0].target_song_id(), Some("grievouslady"));
    assert_eq!(entry.conditions[1].target_song_id(), None);
}

fn song_id_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{2,14}").expect("valid id regex")
}

fn grade_strategy() -> impl Strategy<Value = ClearGrade> {
    prop_oneof![
        Just(ClearGrade::Any),
        Just(ClearGrade::C),
        Just(ClearGrade::A),
        Just(ClearGrade::Aa),
        Just(ClearGrade::ExPlus),
    ]
}

fn condition_strategy() -> impl Strategy<Value = UnlockCondition> {
    let leaf = prop_oneof![
        (0..2000i32).prop_map(|credit| UnlockCondition::Fragment { credit }),
        (song_id_strategy(), 0..5i32, grade_strategy()).prop_map(
            |(song_id, song_difficulty, grade)| UnlockCondition::ClearSong {
                song_id,
                song_difficulty,
                grade,
            }
        ),
        (song_id_strategy(), 0..5i32).prop_map(|(song_id, song_difficulty)| {
            UnlockCondition::PlaySong {
                song_id,
                song_difficulty,
            }
        }),
        (0..1400i32).prop_map(|rating| UnlockCondition::Potential { rating }),
        (1..21i32, 1..10i32)
            .prop_map(|(rating, times)| UnlockCondition::ClearRatingMultiple { rating, times }),
        Just(UnlockCondition::Special),
        (0..80i32).prop_map(|character_id| UnlockCondition::Character { character_id }),
    ];

    leaf.prop_recursive(2, 8, 3, |inner| {
        prop::collection::vec(inner, 1..4)
            .prop_map(|conditions| UnlockCondition::Choice { conditions })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn arbitrary_conditions_roundtrip(condition in condition_strategy()) {
        let encoded =
            serde_json::to_string(&condition).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded: UnlockCondition =
            serde_json::from_str(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, condition);
    }
}
