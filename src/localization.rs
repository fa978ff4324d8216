//! Localized display text and search text, and the quirky wire forms of both.
//!
//! The manifests carry localized text as objects keyed by a closed set of
//! five language codes. Display text (`title_localized`, `name_localized`,
//! ...) always maps a language to a single string. Search text
//! (`search_title`, `search_artist`) may map a language to a single string OR
//! to an array of fragments; the array form is normalized to one
//! space-joined string on decode and is always written back in the flat
//! string form.

use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};
use unic_langid::LanguageIdentifier;

/// The closed set of languages the manifests localize into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    English,
    Japanese,
    Korean,
    SimplifiedChinese,
    TraditionalChinese,
}

impl Lang {
    /// All languages, in the order fields are written on encode.
    pub const ALL: [Lang; 5] = [
        Lang::English,
        Lang::Japanese,
        Lang::Korean,
        Lang::SimplifiedChinese,
        Lang::TraditionalChinese,
    ];

    /// The wire code as it appears in the manifests.
    pub fn code(self) -> &'static str {
        match self {
            Lang::English => "en",
            Lang::Japanese => "ja",
            Lang::Korean => "ko",
            Lang::SimplifiedChinese => "zh-Hans",
            Lang::TraditionalChinese => "zh-Hant",
        }
    }

    /// Exact wire-code lookup used by the codecs. Anything that is not one
    /// of the five recognized codes is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Lang::English),
            "ja" => Some(Lang::Japanese),
            "ko" => Some(Lang::Korean),
            "zh-Hans" => Some(Lang::SimplifiedChinese),
            "zh-Hant" => Some(Lang::TraditionalChinese),
            _ => None,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    /// Tolerant BCP 47 lookup (`en-US`, `zh-hans`, ...) for caller-facing
    /// accessors. The codecs themselves use [`Lang::from_code`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: LanguageIdentifier = s
            .parse()
            .map_err(|_| format!("invalid language tag: {}", s))?;

        match id.language.as_str() {
            "en" => Ok(Lang::English),
            "ja" => Ok(Lang::Japanese),
            "ko" => Ok(Lang::Korean),
            "zh" => match id.script.as_ref().map(|script| script.as_str()) {
                Some("Hant") => Ok(Lang::TraditionalChinese),
                _ => Ok(Lang::SimplifiedChinese),
            },
            _ => Err(format!("unsupported language tag: {}", s)),
        }
    }
}

/// A localized display-text block (`title_localized`, `name_localized`, ...).
///
/// Every present language maps to a single string. English is what the game
/// displays when nothing else matches; its absence is tolerated here and
/// flagged by validation instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "en", default, skip_serializing_if = "is_blank")]
    pub english: Option<String>,

    #[serde(rename = "ja", default, skip_serializing_if = "is_blank")]
    pub japanese: Option<String>,

    #[serde(rename = "ko", default, skip_serializing_if = "is_blank")]
    pub korean: Option<String>,

    #[serde(rename = "zh-Hans", default, skip_serializing_if = "is_blank")]
    pub simplified_chinese: Option<String>,

    #[serde(rename = "zh-Hant", default, skip_serializing_if = "is_blank")]
    pub traditional_chinese: Option<String>,
}

impl LocalizedText {
    /// Returns the text for one language, if present.
    pub fn get_lang(&self, lang: Lang) -> Option<&str> {
        match lang {
            Lang::English => self.english.as_deref(),
            Lang::Japanese => self.japanese.as_deref(),
            Lang::Korean => self.korean.as_deref(),
            Lang::SimplifiedChinese => self.simplified_chinese.as_deref(),
            Lang::TraditionalChinese => self.traditional_chinese.as_deref(),
        }
    }

    /// Replaces the text for one language.
    pub fn set(&mut self, lang: Lang, value: Option<String>) {
        let slot = match lang {
            Lang::English => &mut self.english,
            Lang::Japanese => &mut self.japanese,
            Lang::Korean => &mut self.korean,
            Lang::SimplifiedChinese => &mut self.simplified_chinese,
            Lang::TraditionalChinese => &mut self.traditional_chinese,
        };
        *slot = value;
    }

    /// Looks text up by a BCP 47 tag, falling back to English and then to
    /// the empty string.
    pub fn get(&self, tag: &str) -> &str {
        tag.parse::<Lang>()
            .ok()
            .and_then(|lang| self.get_lang(lang))
            .or_else(|| self.get_lang(Lang::English))
            .unwrap_or("")
    }

    /// True when no language carries any text.
    pub fn is_empty(&self) -> bool {
        Lang::ALL
            .iter()
            .all(|lang| self.get_lang(*lang).is_none_or(str::is_empty))
    }

    /// True when the English text is present — the display requirement the
    /// validator enforces.
    pub fn is_valid(&self) -> bool {
        self.english
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// A localized search-text block (`search_title`, `search_artist`).
///
/// Decoding accepts either a plain string or an array of fragments per
/// language; fragments are joined with a single space. Encoding always emits
/// the flat string form, so array-shaped input round-trips semantically but
/// not byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchText {
    #[serde(rename = "en", skip_serializing_if = "is_blank")]
    pub english: Option<String>,

    #[serde(rename = "ja", skip_serializing_if = "is_blank")]
    pub japanese: Option<String>,

    #[serde(rename = "ko", skip_serializing_if = "is_blank")]
    pub korean: Option<String>,

    #[serde(rename = "zh-Hans", skip_serializing_if = "is_blank")]
    pub simplified_chinese: Option<String>,

    #[serde(rename = "zh-Hant", skip_serializing_if = "is_blank")]
    pub traditional_chinese: Option<String>,
}

impl SearchText {
    /// Returns the normalized text for one language, if present.
    pub fn get_lang(&self, lang: Lang) -> Option<&str> {
        match lang {
            Lang::English => self.english.as_deref(),
            Lang::Japanese => self.japanese.as_deref(),
            Lang::Korean => self.korean.as_deref(),
            Lang::SimplifiedChinese => self.simplified_chinese.as_deref(),
            Lang::TraditionalChinese => self.traditional_chinese.as_deref(),
        }
    }

    /// Replaces the text for one language.
    pub fn set(&mut self, lang: Lang, value: Option<String>) {
        let slot = match lang {
            Lang::English => &mut self.english,
            Lang::Japanese => &mut self.japanese,
            Lang::Korean => &mut self.korean,
            Lang::SimplifiedChinese => &mut self.simplified_chinese,
            Lang::TraditionalChinese => &mut self.traditional_chinese,
        };
        *slot = value;
    }

    /// True when no language carries any text.
    pub fn is_empty(&self) -> bool {
        Lang::ALL
            .iter()
            .all(|lang| self.get_lang(*lang).is_none_or(str::is_empty))
    }
}

impl<'de> Deserialize<'de> for SearchText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SearchTextVisitor;

        impl<'de> Visitor<'de> for SearchTextVisitor {
            type Value = SearchText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a search localization object or null")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchText::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut text = SearchText::default();
                while let Some(key) = map.next_key::<String>()? {
                    match Lang::from_code(&key) {
                        Some(lang) => {
                            let value = map.next_value::<SearchValue>()?;
                            text.set(lang, value.0);
                        }
                        // Unrecognized keys are dropped whole, including any
                        // nested structure, so sibling keys stay aligned.
                        None => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(text)
            }
        }

        deserializer.deserialize_any(SearchTextVisitor)
    }
}

/// One language's value inside a search-text block: a string, or an array
/// whose string elements are joined with a single space.
struct SearchValue(Option<String>);

impl<'de> Deserialize<'de> for SearchValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SearchValueVisitor;

        impl<'de> Visitor<'de> for SearchValueVisitor {
            type Value = SearchValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or an array of text fragments")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(Some(value.to_owned())))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut fragments = Vec::new();
                while let Some(element) = seq.next_element::<serde_json::Value>()? {
                    // Non-string elements are skipped silently.
                    if let serde_json::Value::String(fragment) = element {
                        fragments.push(fragment);
                    }
                }
                Ok(SearchValue(Some(fragments.join(" "))))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(None))
            }

            fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(None))
            }

            fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(None))
            }

            fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(None))
            }

            fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SearchValue(None))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map
                    .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                    .is_some()
                {}
                Ok(SearchValue(None))
            }
        }

        deserializer.deserialize_any(SearchValueVisitor)
    }
}

// Write-side check shared by both blocks: absent and empty both mean "omit".
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Field-site decoder for localized blocks that may be an explicit `null`
/// on the wire; `null` decodes to the empty block.
pub(crate) fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
