#![forbid(unsafe_code)]
//! Songlist codec and validation toolkit for Rust.
//!
//! Parses, writes, and validates the three JSON manifests of an Arcaea-style
//! content catalog: `songlist`, `packlist`, and `unlocks`. All processing
//! goes through the typed [`Catalog`] model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use songcodec::Codec;
//!
//! let mut codec = Codec::new();
//! codec.read_dir("assets/songs")?;
//!
//! let report = codec.validate(false);
//! println!("{}", report.summary());
//! # Ok::<(), songcodec::Error>(())
//! ```
//!
//! # The dialect
//!
//! The manifests are loosely typed and have grown across game versions:
//!
//! - Localized search text may be a plain string or an array of fragments
//!   per language; both decode to one canonical string.
//! - Unlock conditions are a polymorphic union of twelve shapes keyed by an
//!   integer `type` discriminant, with a historical gap in the code space.
//! - Most record fields are optional and absent in older data.
//!
//! The codecs normalize all of that into the strongly typed model and encode
//! back symmetrically; the [`Validator`](validation::Validator) then checks
//! each record and the references between the collections before a catalog
//! is published.

pub mod codec;
pub mod error;
pub mod formats;
pub mod localization;
pub mod traits;
pub mod types;
pub mod unlock;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, song_folder_names},
    error::Error,
    formats::ManifestType,
    localization::{Lang, LocalizedText, SearchText},
    types::{
        Catalog, ClearGrade, Difficulty, HiddenUntil, Pack, RatingClass, Side, Song, UnlockEntry,
    },
    unlock::{ConditionKind, UnlockCondition},
    validation::{FolderStatistics, ValidationReport, Validator},
};
