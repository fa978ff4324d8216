//! Core, manifest-agnostic types for songcodec.
//! The manifest codecs decode into these; the validator reasons over them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    localization::{LocalizedText, SearchText},
    traits::Parser,
    unlock::UnlockCondition,
};

/// Difficulty slot of a chart. Eternal is the fifth slot added in newer
/// game versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RatingClass {
    Past,
    Present,
    Future,
    Beyond,
    Eternal,
}

impl Default for RatingClass {
    fn default() -> Self {
        RatingClass::Past
    }
}

impl From<RatingClass> for u8 {
    fn from(value: RatingClass) -> Self {
        match value {
            RatingClass::Past => 0,
            RatingClass::Present => 1,
            RatingClass::Future => 2,
            RatingClass::Beyond => 3,
            RatingClass::Eternal => 4,
        }
    }
}

impl TryFrom<u8> for RatingClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RatingClass::Past),
            1 => Ok(RatingClass::Present),
            2 => Ok(RatingClass::Future),
            3 => Ok(RatingClass::Beyond),
            4 => Ok(RatingClass::Eternal),
            _ => Err(Error::DataMismatch(format!(
                "unknown rating class: {}",
                value
            ))),
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RatingClass::Past => "Past",
            RatingClass::Present => "Present",
            RatingClass::Future => "Future",
            RatingClass::Beyond => "Beyond",
            RatingClass::Eternal => "Eternal",
        };
        write!(f, "{}", name)
    }
}

/// Which side of the story a song belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    Light,
    Conflict,
    Colorless,
}

impl Default for Side {
    fn default() -> Self {
        Side::Light
    }
}

impl From<Side> for u8 {
    fn from(value: Side) -> Self {
        match value {
            Side::Light => 0,
            Side::Conflict => 1,
            Side::Colorless => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Light),
            1 => Ok(Side::Conflict),
            2 => Ok(Side::Colorless),
            _ => Err(Error::DataMismatch(format!("unknown side: {}", value))),
        }
    }
}

/// Result grade required by clear-type unlock conditions. `Any` accepts
/// every clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClearGrade {
    Any,
    C,
    B,
    A,
    Aa,
    Ex,
    ExPlus,
}

impl Default for ClearGrade {
    fn default() -> Self {
        ClearGrade::Any
    }
}

impl From<ClearGrade> for u8 {
    fn from(value: ClearGrade) -> Self {
        match value {
            ClearGrade::Any => 0,
            ClearGrade::C => 1,
            ClearGrade::B => 2,
            ClearGrade::A => 3,
            ClearGrade::Aa => 4,
            ClearGrade::Ex => 5,
            ClearGrade::ExPlus => 6,
        }
    }
}

impl TryFrom<u8> for ClearGrade {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ClearGrade::Any),
            1 => Ok(ClearGrade::C),
            2 => Ok(ClearGrade::B),
            3 => Ok(ClearGrade::A),
            4 => Ok(ClearGrade::Aa),
            5 => Ok(ClearGrade::Ex),
            6 => Ok(ClearGrade::ExPlus),
            _ => Err(Error::DataMismatch(format!(
                "unknown clear grade: {}",
                value
            ))),
        }
    }
}

/// Parsed form of a difficulty's `hidden_until` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenUntil {
    /// Never shown while locked.
    Always,
    /// Shown once any difficulty of the song is unlocked.
    Difficulty,
    /// Shown once the song itself is unlocked.
    Song,
}

impl FromStr for HiddenUntil {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(HiddenUntil::Always),
            "difficulty" => Ok(HiddenUntil::Difficulty),
            "song" => Ok(HiddenUntil::Song),
            _ => Err(Error::DataMismatch(format!(
                "unknown hidden_until value: {}",
                s
            ))),
        }
    }
}

/// One difficulty slot of a song.
///
/// Most fields were added across game versions and stay absent in older
/// records; they are optional so "unset" stays distinguishable from an
/// explicit zero or false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    #[serde(rename = "ratingClass", default)]
    pub rating_class: RatingClass,

    /// Chart designer credit. Official content sometimes ships without one.
    #[serde(rename = "chartDesigner", default)]
    pub chart_designer: String,

    /// Jacket artist credit.
    #[serde(rename = "jacketDesigner", default)]
    pub jacket_designer: String,

    /// Difficulty level, 1–20 for published charts.
    #[serde(default = "default_rating")]
    pub rating: i32,

    /// Whether the level displays with a trailing `+`.
    #[serde(rename = "ratingPlus", default, skip_serializing_if = "Option::is_none")]
    pub rating_plus: Option<bool>,

    /// Per-difficulty title override.
    #[serde(
        rename = "title_localized",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title_localized: Option<LocalizedText>,

    /// Per-difficulty artist override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Per-difficulty BPM display override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<String>,

    /// Per-difficulty base BPM override.
    #[serde(rename = "bpm_base", default, skip_serializing_if = "Option::is_none")]
    pub bpm_base: Option<f64>,

    /// Per-difficulty background.
    #[serde(rename = "bg", default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Background used while skill-inverted.
    #[serde(rename = "bg_inverse", default, skip_serializing_if = "Option::is_none")]
    pub background_inverse: Option<String>,

    /// Whether the difficulty is gated behind world mode.
    #[serde(rename = "world_unlock", default, skip_serializing_if = "Option::is_none")]
    pub world_unlock: Option<bool>,

    /// Whether the difficulty brings its own jacket.
    #[serde(
        rename = "jacketOverride",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub jacket_override: Option<bool>,

    /// Whether the difficulty brings its own audio.
    #[serde(
        rename = "audioOverride",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_override: Option<bool>,

    /// Night-time jacket variant.
    #[serde(rename = "jacket_night", default, skip_serializing_if = "Option::is_none")]
    pub jacket_night: Option<String>,

    /// Visibility gating while locked; see [`HiddenUntil`].
    #[serde(rename = "hidden_until", default, skip_serializing_if = "Option::is_none")]
    pub hidden_until: Option<String>,

    /// Release timestamp in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,

    /// Game version the difficulty is filed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

fn default_rating() -> i32 {
    1
}

impl Difficulty {
    /// Structural validity for a publishable chart: both credits filled in
    /// and a level inside the displayed 1–20 range. The main validation pass
    /// is more lenient; see the validator for what is enforced when.
    pub fn is_valid(&self) -> bool {
        !self.chart_designer.trim().is_empty()
            && !self.jacket_designer.trim().is_empty()
            && (1..=20).contains(&self.rating)
    }

    /// Level display, e.g. `Future 10+`.
    pub fn full_display_name(&self) -> String {
        let plus = if self.rating_plus == Some(true) { "+" } else { "" };
        format!("{} {}{}", self.rating_class, self.rating, plus)
    }

    pub fn is_beyond(&self) -> bool {
        self.rating_class == RatingClass::Beyond
    }

    pub fn is_eternal(&self) -> bool {
        self.rating_class == RatingClass::Eternal
    }

    /// Parsed `hidden_until`, if the field is present and recognized.
    pub fn hidden_until_kind(&self) -> Option<HiddenUntil> {
        self.hidden_until.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether the difficulty carries any gating or override that restricts
    /// plain selection.
    pub fn has_restrictions(&self) -> bool {
        self.world_unlock == Some(true)
            || self
                .hidden_until
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
            || self.jacket_override == Some(true)
            || self.audio_override == Some(true)
    }
}

/// One song of the catalog, owning its ordered difficulty slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier; also the expected asset folder name.
    #[serde(default)]
    pub id: String,

    #[serde(
        rename = "title_localized",
        default,
        deserialize_with = "crate::localization::default_on_null"
    )]
    pub title_localized: LocalizedText,

    #[serde(default)]
    pub artist: String,

    /// Search index text for the title; see [`SearchText`] for the
    /// string-or-array wire form.
    #[serde(
        rename = "search_title",
        default,
        skip_serializing_if = "SearchText::is_empty"
    )]
    pub search_title: SearchText,

    /// Search index text for the artist.
    #[serde(
        rename = "search_artist",
        default,
        skip_serializing_if = "SearchText::is_empty"
    )]
    pub search_artist: SearchText,

    /// BPM as displayed, e.g. `126 - 252`.
    #[serde(default)]
    pub bpm: String,

    /// Base BPM the chart scrolls against; must be positive.
    #[serde(rename = "bpm_base", default)]
    pub bpm_base: f64,

    /// Owning pack id. A soft reference, validated but not enforced.
    #[serde(default)]
    pub set: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase: Option<String>,

    #[serde(default)]
    pub side: Side,

    #[serde(rename = "bg", default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Whether the audio is downloaded on demand; such songs live in a
    /// `dl_`-prefixed asset folder.
    #[serde(rename = "remote_dl", default, skip_serializing_if = "Option::is_none")]
    pub remote_dl: Option<bool>,

    #[serde(rename = "world_unlock", default, skip_serializing_if = "Option::is_none")]
    pub world_unlock: Option<bool>,

    /// Release timestamp in whole seconds.
    #[serde(default)]
    pub date: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
}

impl Song {
    /// Structural validity for a publishable song. The validator reports
    /// the individual findings instead of a single flag.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && self.title_localized.is_valid()
            && self.bpm_base > 0.0
            && !self.difficulties.is_empty()
    }

    /// Returns the difficulty in the given slot, if charted.
    pub fn difficulty(&self, rating_class: RatingClass) -> Option<&Difficulty> {
        self.difficulties
            .iter()
            .find(|difficulty| difficulty.rating_class == rating_class)
    }
}

/// One content pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// Unique identifier referenced by [`Song::set`].
    #[serde(default)]
    pub id: String,

    #[serde(rename = "is_extend_pack", default, skip_serializing_if = "Option::is_none")]
    pub is_extend_pack: Option<bool>,

    #[serde(
        rename = "is_active_extend_pack",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_active_extend_pack: Option<bool>,

    /// The pack this extend pack hangs off.
    #[serde(rename = "pack_parent", default, skip_serializing_if = "Option::is_none")]
    pub pack_parent: Option<String>,

    #[serde(rename = "custom_banner", default, skip_serializing_if = "Option::is_none")]
    pub custom_banner: Option<bool>,

    #[serde(
        rename = "cutout_pack_image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cutout_pack_image: Option<bool>,

    #[serde(
        rename = "small_pack_image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub small_pack_image: Option<bool>,

    /// Bonus character shipped with the pack; −1 means none.
    #[serde(rename = "plus_character", default = "default_plus_character")]
    pub plus_character: i32,

    #[serde(
        rename = "name_localized",
        default,
        deserialize_with = "crate::localization::default_on_null"
    )]
    pub name_localized: LocalizedText,

    #[serde(
        rename = "description_localized",
        default,
        deserialize_with = "crate::localization::default_on_null"
    )]
    pub description_localized: LocalizedText,
}

fn default_plus_character() -> i32 {
    -1
}

impl Pack {
    /// Structural validity: id plus English name and description.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && self.name_localized.is_valid()
            && self.description_localized.is_valid()
    }

    /// Pack name for a language tag, falling back to English.
    pub fn name(&self, tag: &str) -> &str {
        self.name_localized.get(tag)
    }

    /// Pack description for a language tag, falling back to English.
    pub fn description(&self, tag: &str) -> &str {
        self.description_localized.get(tag)
    }

    pub fn is_extend(&self) -> bool {
        self.is_extend_pack == Some(true)
    }

    pub fn is_active_extend(&self) -> bool {
        self.is_active_extend_pack == Some(true)
    }

    pub fn has_parent(&self) -> bool {
        self.pack_parent
            .as_deref()
            .is_some_and(|parent| !parent.trim().is_empty())
    }

    /// Whether any of the special banner/image display flags is set.
    pub fn has_special_display(&self) -> bool {
        self.custom_banner == Some(true)
            || self.cutout_pack_image == Some(true)
            || self.small_pack_image == Some(true)
    }
}

/// One record of the `unlocks` manifest: the conditions gating one
/// difficulty of one song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEntry {
    /// The gated song. A soft reference, validated but not enforced.
    #[serde(rename = "songId", default)]
    pub song_id: String,

    #[serde(rename = "ratingClass", default)]
    pub rating_class: RatingClass,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<UnlockCondition>,
}

/// The fully decoded content catalog: everything the three manifests carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub songs: Vec<Song>,

    #[serde(default)]
    pub packs: Vec<Pack>,

    #[serde(default)]
    pub unlocks: Vec<UnlockEntry>,
}

impl Catalog {
    /// Finds a song by id.
    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// Finds a pack by id.
    pub fn pack(&self, id: &str) -> Option<&Pack> {
        self.packs.iter().find(|pack| pack.id == id)
    }
}

impl Parser for Catalog {
    /// Parse the JSON cache form from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write the JSON cache form to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)
    }
}
