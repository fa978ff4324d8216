//! The polymorphic unlock-condition union.
//!
//! Unlock records are disambiguated only by an integer `type` discriminant.
//! The code space is historical: 0–6 were added as play mechanics grew, and
//! 101–106 came later for the character/story systems, so the gap between 6
//! and 101 is intentional and no variant exists in between. Unknown codes
//! are a hard decode failure.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de,
    ser::SerializeMap,
};

use crate::{
    error::Error,
    types::{ClearGrade, RatingClass},
};

/// Discriminant table for the unlock-condition union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Fragment,
    ClearSong,
    PlaySong,
    ClearSongMultiple,
    Choice,
    Potential,
    ClearRatingMultiple,
    Special,
    Character,
    Story,
    CharacterForm,
    DifficultyConfig,
}

impl ConditionKind {
    /// The wire value of the `type` field.
    pub fn code(self) -> i64 {
        match self {
            ConditionKind::Fragment => 0,
            ConditionKind::ClearSong => 1,
            ConditionKind::PlaySong => 2,
            ConditionKind::ClearSongMultiple => 3,
            ConditionKind::Choice => 4,
            ConditionKind::Potential => 5,
            ConditionKind::ClearRatingMultiple => 6,
            ConditionKind::Special => 101,
            ConditionKind::Character => 103,
            ConditionKind::Story => 104,
            ConditionKind::CharacterForm => 105,
            ConditionKind::DifficultyConfig => 106,
        }
    }
}

impl TryFrom<i64> for ConditionKind {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ConditionKind::Fragment),
            1 => Ok(ConditionKind::ClearSong),
            2 => Ok(ConditionKind::PlaySong),
            3 => Ok(ConditionKind::ClearSongMultiple),
            4 => Ok(ConditionKind::Choice),
            5 => Ok(ConditionKind::Potential),
            6 => Ok(ConditionKind::ClearRatingMultiple),
            101 => Ok(ConditionKind::Special),
            103 => Ok(ConditionKind::Character),
            104 => Ok(ConditionKind::Story),
            105 => Ok(ConditionKind::CharacterForm),
            106 => Ok(ConditionKind::DifficultyConfig),
            _ => Err(Error::DataMismatch(format!(
                "unknown unlock condition type: {}",
                code
            ))),
        }
    }
}

/// One unlock condition, as a closed tagged union.
///
/// Each variant carries its own field set; the `type` discriminant is not
/// model state, it is recomputed from the variant on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockCondition {
    /// Purchase with currency fragments.
    Fragment { credit: i32 },
    /// Clear a target chart with at least the given grade.
    ClearSong {
        song_id: String,
        song_difficulty: i32,
        grade: ClearGrade,
    },
    /// Play a target chart once, pass or fail.
    PlaySong {
        song_id: String,
        song_difficulty: i32,
    },
    /// Clear a target chart repeatedly.
    ClearSongMultiple {
        song_id: String,
        song_difficulty: i32,
        grade: ClearGrade,
        times: i32,
    },
    /// Any one of the nested conditions suffices.
    Choice { conditions: Vec<UnlockCondition> },
    /// Reach a potential (player rating) threshold.
    Potential { rating: i32 },
    /// Clear any charts of the given rating repeatedly.
    ClearRatingMultiple { rating: i32, times: i32 },
    /// Granted by an event or anniversary, outside the manifest's control.
    Special,
    /// Own a specific character.
    Character { character_id: i32 },
    /// Finish a story chapter.
    Story { story_id: String },
    /// Have a specific character form awakened.
    CharacterForm { character_id: i32, form: i32 },
    /// Gated on the difficulty slot configuration itself.
    DifficultyConfig { rating_class: RatingClass },
}

impl UnlockCondition {
    /// The discriminant this condition serializes under.
    pub fn kind(&self) -> ConditionKind {
        match self {
            UnlockCondition::Fragment { .. } => ConditionKind::Fragment,
            UnlockCondition::ClearSong { .. } => ConditionKind::ClearSong,
            UnlockCondition::PlaySong { .. } => ConditionKind::PlaySong,
            UnlockCondition::ClearSongMultiple { .. } => ConditionKind::ClearSongMultiple,
            UnlockCondition::Choice { .. } => ConditionKind::Choice,
            UnlockCondition::Potential { .. } => ConditionKind::Potential,
            UnlockCondition::ClearRatingMultiple { .. } => ConditionKind::ClearRatingMultiple,
            UnlockCondition::Special => ConditionKind::Special,
            UnlockCondition::Character { .. } => ConditionKind::Character,
            UnlockCondition::Story { .. } => ConditionKind::Story,
            UnlockCondition::CharacterForm { .. } => ConditionKind::CharacterForm,
            UnlockCondition::DifficultyConfig { .. } => ConditionKind::DifficultyConfig,
        }
    }

    /// The song another chart's condition points at, for the variants that
    /// target one. This reference is advisory; resolving it is the caller's
    /// choice.
    pub fn target_song_id(&self) -> Option<&str> {
        match self {
            UnlockCondition::ClearSong { song_id, .. }
            | UnlockCondition::PlaySong { song_id, .. }
            | UnlockCondition::ClearSongMultiple { song_id, .. } => Some(song_id),
            _ => None,
        }
    }
}

/// Field superset all twelve variants decode through. Absent fields fall
/// back to defaults; the validator owns required-ness.
#[derive(Deserialize)]
struct RawCondition {
    #[serde(rename = "type")]
    kind: Option<i64>,
    credit: Option<i32>,
    song_id: Option<String>,
    song_difficulty: Option<i32>,
    grade: Option<ClearGrade>,
    times: Option<i32>,
    rating: Option<i32>,
    character_id: Option<i32>,
    story_id: Option<String>,
    form: Option<i32>,
    rating_class: Option<RatingClass>,
    conditions: Option<Vec<UnlockCondition>>,
}

impl TryFrom<RawCondition> for UnlockCondition {
    type Error = Error;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let code = raw.kind.ok_or_else(|| {
            Error::DataMismatch("unlock condition is missing 'type'".to_string())
        })?;

        let condition = match ConditionKind::try_from(code)? {
            ConditionKind::Fragment => UnlockCondition::Fragment {
                credit: raw.credit.unwrap_or_default(),
            },
            ConditionKind::ClearSong => UnlockCondition::ClearSong {
                song_id: raw.song_id.unwrap_or_default(),
                song_difficulty: raw.song_difficulty.unwrap_or_default(),
                grade: raw.grade.unwrap_or_default(),
            },
            ConditionKind::PlaySong => UnlockCondition::PlaySong {
                song_id: raw.song_id.unwrap_or_default(),
                song_difficulty: raw.song_difficulty.unwrap_or_default(),
            },
            ConditionKind::ClearSongMultiple => UnlockCondition::ClearSongMultiple {
                song_id: raw.song_id.unwrap_or_default(),
                song_difficulty: raw.song_difficulty.unwrap_or_default(),
                grade: raw.grade.unwrap_or_default(),
                times: raw.times.unwrap_or_default(),
            },
            ConditionKind::Choice => UnlockCondition::Choice {
                conditions: raw.conditions.unwrap_or_default(),
            },
            ConditionKind::Potential => UnlockCondition::Potential {
                rating: raw.rating.unwrap_or_default(),
            },
            ConditionKind::ClearRatingMultiple => UnlockCondition::ClearRatingMultiple {
                rating: raw.rating.unwrap_or_default(),
                times: raw.times.unwrap_or_default(),
            },
            ConditionKind::Special => UnlockCondition::Special,
            ConditionKind::Character => UnlockCondition::Character {
                character_id: raw.character_id.unwrap_or_default(),
            },
            ConditionKind::Story => UnlockCondition::Story {
                story_id: raw.story_id.unwrap_or_default(),
            },
            ConditionKind::CharacterForm => UnlockCondition::CharacterForm {
                character_id: raw.character_id.unwrap_or_default(),
                form: raw.form.unwrap_or_default(),
            },
            ConditionKind::DifficultyConfig => UnlockCondition::DifficultyConfig {
                rating_class: raw.rating_class.unwrap_or_default(),
            },
        };

        Ok(condition)
    }
}

impl<'de> Deserialize<'de> for UnlockCondition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCondition::deserialize(deserializer)?;
        UnlockCondition::try_from(raw).map_err(de::Error::custom)
    }
}

impl Serialize for UnlockCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind().code())?;

        match self {
            UnlockCondition::Fragment { credit } => {
                map.serialize_entry("credit", credit)?;
            }
            UnlockCondition::ClearSong {
                song_id,
                song_difficulty,
                grade,
            } => {
                map.serialize_entry("song_id", song_id)?;
                map.serialize_entry("song_difficulty", song_difficulty)?;
                map.serialize_entry("grade", grade)?;
            }
            UnlockCondition::PlaySong {
                song_id,
                song_difficulty,
            } => {
                map.serialize_entry("song_id", song_id)?;
                map.serialize_entry("song_difficulty", song_difficulty)?;
            }
            UnlockCondition::ClearSongMultiple {
                song_id,
                song_difficulty,
                grade,
                times,
            } => {
                map.serialize_entry("song_id", song_id)?;
                map.serialize_entry("song_difficulty", song_difficulty)?;
                map.serialize_entry("grade", grade)?;
                map.serialize_entry("times", times)?;
            }
            UnlockCondition::Choice { conditions } => {
                map.serialize_entry("conditions", conditions)?;
            }
            UnlockCondition::Potential { rating } => {
                map.serialize_entry("rating", rating)?;
            }
            UnlockCondition::ClearRatingMultiple { rating, times } => {
                map.serialize_entry("rating", rating)?;
                map.serialize_entry("times", times)?;
            }
            UnlockCondition::Special => {}
            UnlockCondition::Character { character_id } => {
                map.serialize_entry("character_id", character_id)?;
            }
            UnlockCondition::Story { story_id } => {
                map.serialize_entry("story_id", story_id)?;
            }
            UnlockCondition::CharacterForm { character_id, form } => {
                map.serialize_entry("character_id", character_id)?;
                map.serialize_entry("form", form)?;
            }
            UnlockCondition::DifficultyConfig { rating_class } => {
                map.serialize_entry("rating_class", rating_class)?;
            }
        }

        map.end()
    }
}
