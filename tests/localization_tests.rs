use proptest::prelude::*;
use songcodec::{Lang, LocalizedText, SearchText};

#[test]
fn localized_text_roundtrips_through_json() {
    let mut text = LocalizedText::default();
    text.set(Lang::English, Some("Sayonara Hatsukoi".to_string()));
    text.set(Lang::Japanese, Some("サヨナラ初恋".to_string()));
    text.set(Lang::Korean, Some("안녕 첫사랑".to_string()));
    text.set(Lang::SimplifiedChinese, Some("再见初恋".to_string()));
    text.set(Lang::TraditionalChinese, Some("再見初戀".to_string()));

    let encoded = serde_json::to_string(&text).expect("encode localized text");
    let decoded: LocalizedText = serde_json::from_str(&encoded).expect("decode localized text");
    assert_eq!(decoded, text);

    for lang in Lang::ALL {
        assert!(decoded.get_lang(lang).is_some(), "{} should be present", lang);
    }
}

#[test]
fn localized_text_encodes_languages_in_fixed_order() {
    let text = LocalizedText {
        english: Some("Lost Civilization".to_string()),
        traditional_chinese: Some("失落文明".to_string()),
        japanese: Some("ロスト".to_string()),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_string(&text).unwrap(),
        r#"{"en":"Lost Civilization","ja":"ロスト","zh-Hant":"失落文明"}"#
    );
}

#[test]
fn localized_text_omits_empty_languages() {
    let text = LocalizedText {
        english: Some("Fairytale".to_string()),
        japanese: Some(String::new()),
        korean: None,
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_string(&text).unwrap(),
        r#"{"en":"Fairytale"}"#
    );
}

#[test]
fn localized_text_ignores_unrecognized_keys() {
    let decoded: LocalizedText = serde_json::from_str(
        r#"{"en": "Dement", "romanized": {"kana": ["で", "めんと"]}, "ja": "ディメント"}"#,
    )
    .expect("unknown keys must not break decoding");

    assert_eq!(decoded.english.as_deref(), Some("Dement"));
    assert_eq!(decoded.japanese.as_deref(), Some("ディメント"));
}

#[test]
fn localized_text_rejects_non_string_values() {
    assert!(serde_json::from_str::<LocalizedText>(r#"{"en": 5}"#).is_err());
    assert!(serde_json::from_str::<LocalizedText>(r#"{"ja": ["A", "B"]}"#).is_err());
}

#[test]
fn search_text_joins_fragment_arrays_with_one_space() {
    let decoded: SearchText =
        serde_json::from_str(r#"{"ja": ["sayonara", "hatsukoi"]}"#).unwrap();
    assert_eq!(decoded.japanese.as_deref(), Some("sayonara hatsukoi"));
}

#[test]
fn search_text_skips_non_string_fragments() {
    let decoded: SearchText =
        serde_json::from_str(r#"{"en": ["lost", 3, ["nested"], {"x": 1}, "civilization"]}"#)
            .unwrap();
    assert_eq!(decoded.english.as_deref(), Some("lost civilization"));
}

#[test]
fn search_text_skips_unknown_keys_without_corrupting_siblings() {
    let decoded: SearchText = serde_json::from_str(
        r#"{"reading": {"deep": [1, {"more": [2, 3]}]}, "ko": "안녕", "ignored": [true, null], "en": "hello"}"#,
    )
    .unwrap();

    assert_eq!(decoded.korean.as_deref(), Some("안녕"));
    assert_eq!(decoded.english.as_deref(), Some("hello"));
    assert!(decoded.japanese.is_none());
}

#[test]
fn search_text_null_decodes_to_empty() {
    let decoded: SearchText = serde_json::from_str("null").unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn search_text_rejects_non_object_roots() {
    assert!(serde_json::from_str::<SearchText>("5").is_err());
    assert!(serde_json::from_str::<SearchText>(r#""just text""#).is_err());
    assert!(serde_json::from_str::<SearchText>(r#"["en"]"#).is_err());
}

#[test]
fn search_text_encodes_flat_and_renormalizes_stably() {
    let raw = r#"{"en": ["lost", "civilization"], "ja": "ロスト"}"#;
    let first: SearchText = serde_json::from_str(raw).unwrap();
    assert_eq!(first.english.as_deref(), Some("lost civilization"));

    // The flat form survives further encode/decode cycles unchanged.
    let encoded = serde_json::to_string(&first).unwrap();
    assert_eq!(encoded, r#"{"en":"lost civilization","ja":"ロスト"}"#);
    let second: SearchText = serde_json::from_str(&encoded).unwrap();
    assert_eq!(second, first);
}

#[test]
fn lang_wire_codes() {
    assert_eq!(Lang::SimplifiedChinese.code(), "zh-Hans");
    assert_eq!(Lang::TraditionalChinese.to_string(), "zh-Hant");
    assert_eq!(Lang::from_code("ko"), Some(Lang::Korean));
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{1,30}").expect("valid text regex")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn localized_text_roundtrip_holds_for_any_text(
        en in text_strategy(),
        ja in text_strategy(),
        ko in text_strategy(),
    ) {
        let text = LocalizedText {
            english: Some(en),
            japanese: Some(ja),
            korean: Some(ko),
            ..Default::default()
        };

        let encoded = serde_json::to_string(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded: LocalizedText =
            serde_json::from_str(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn search_text_normalization_is_idempotent(
        fragments in prop::collection::vec(text_strategy(), 1..4),
    ) {
        let raw = serde_json::json!({ "en": fragments });
        let first: SearchText =
            serde_json::from_value(raw).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let encoded = serde_json::to_value(&first).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second: SearchText =
            serde_json::from_value(encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(second, first);
    }
}
