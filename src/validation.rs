//! Multi-pass validation over a decoded [`Catalog`].
//!
//! Structural checks run per record; consistency checks reason across the
//! song, pack, and unlock collections; an optional third pass cross-checks
//! song ids against a caller-supplied set of asset folder names. The
//! validator never touches the filesystem itself and keeps no state between
//! runs, so a run can be repeated on a mutated catalog at any time.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Catalog, Difficulty, Pack, Song, UnlockEntry};

/// Folder-name prefix marking downloadable-content song assets.
pub const DL_FOLDER_PREFIX: &str = "dl_";

lazy_static! {
    // The id shape every official song and pack uses.
    static ref ID_PATTERN: Regex = Regex::new(r"^[a-z0-9_]+$").unwrap();
}

/// Validates a [`Catalog`] and produces a [`ValidationReport`].
///
/// The folder-name set is a read-only snapshot supplied by the caller (see
/// [`crate::codec::song_folder_names`]); staleness of the underlying
/// directory is the caller's concern.
pub struct Validator<'a> {
    catalog: &'a Catalog,
    song_folders: Option<HashSet<String>>,
}

impl<'a> Validator<'a> {
    /// Creates a validator over one catalog, without folder data.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            song_folders: None,
        }
    }

    /// Supplies the set of song asset folder names for the folder pass.
    pub fn with_song_folders(mut self, folders: HashSet<String>) -> Self {
        self.song_folders = Some(folders);
        self
    }

    /// Runs every pass and returns the collected report.
    ///
    /// Strict mode promotes the optional checks (chart designer presence,
    /// id shape, the skipped-folder-check notice) from silent to
    /// warning-emitting.
    pub fn validate_all(&self, strict: bool) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.validate_data_integrity(&mut report, strict);

        match &self.song_folders {
            Some(folders) if !folders.is_empty() => {
                self.validate_folder_existence(folders, &mut report);
            }
            _ => {
                if strict {
                    report.add_warning("songs folder not provided, skipping folder check");
                }
            }
        }

        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validation finished"
        );
        report
    }

    fn validate_data_integrity(&self, report: &mut ValidationReport, strict: bool) {
        let catalog = self.catalog;

        // Transient index maps; never persisted on the entities.
        let pack_ids: HashSet<&str> = catalog.packs.iter().map(|pack| pack.id.as_str()).collect();
        let song_ids: HashSet<&str> = catalog.songs.iter().map(|song| song.id.as_str()).collect();

        if catalog.songs.is_empty() {
            report.add_warning("song list is empty");
        }
        if catalog.packs.is_empty() {
            report.add_warning("pack list is empty");
        }

        for song in &catalog.songs {
            self.validate_song(song, &pack_ids, report, strict);
        }
        for pack in &catalog.packs {
            self.validate_pack(pack, report);
        }
        for unlock in &catalog.unlocks {
            self.validate_unlock(unlock, &song_ids, report);
        }

        self.validate_consistency(&pack_ids, report);
    }

    fn validate_song(
        &self,
        song: &Song,
        pack_ids: &HashSet<&str>,
        report: &mut ValidationReport,
        strict: bool,
    ) {
        if song.id.trim().is_empty() {
            report.add_error("song is missing an id");
            return;
        }

        if strict && !ID_PATTERN.is_match(&song.id) {
            report.add_warning(format!("song '{}' has a non-standard id", song.id));
        }

        if !song.title_localized.is_valid() {
            report.add_warning(format!("song '{}' is missing an English title", song.id));
        }

        if song.artist.trim().is_empty() {
            report.add_warning(format!("song '{}' is missing artist information", song.id));
        }

        // The display BPM may stay empty; the base BPM must be positive.
        if song.bpm_base <= 0.0 {
            report.add_error(format!(
                "song '{}' base BPM must be greater than 0",
                song.id
            ));
        }

        if song.set.trim().is_empty() {
            report.add_warning(format!("song '{}' is missing a pack id", song.id));
        } else if !pack_ids.contains(song.set.as_str()) {
            report.add_warning(format!(
                "song '{}' references a pack that does not exist: {}",
                song.id, song.set
            ));
        }

        if song.date <= 0 {
            report.add_warning(format!("song '{}' has an invalid date", song.id));
        }

        if song.difficulties.is_empty() {
            report.add_error(format!("song '{}' has no difficulties", song.id));
        } else {
            for difficulty in &song.difficulties {
                self.validate_difficulty(&song.id, difficulty, report, strict);
            }
        }
    }

    fn validate_difficulty(
        &self,
        song_id: &str,
        difficulty: &Difficulty,
        report: &mut ValidationReport,
        strict: bool,
    ) {
        if difficulty.rating < 0 {
            report.add_error(format!(
                "song '{}' has an invalid difficulty rating",
                song_id
            ));
        }

        // Chart designer may be empty; some official songs ship without one.
        if strict && difficulty.chart_designer.trim().is_empty() {
            report.add_warning(format!(
                "song '{}' has a difficulty with no chart designer",
                song_id
            ));
        }
    }

    fn validate_pack(&self, pack: &Pack, report: &mut ValidationReport) {
        if pack.id.trim().is_empty() {
            report.add_error("pack is missing an id");
            return;
        }

        if !pack.name_localized.is_valid() {
            report.add_warning(format!("pack '{}' is missing an English name", pack.id));
        }
    }

    fn validate_unlock(
        &self,
        unlock: &UnlockEntry,
        song_ids: &HashSet<&str>,
        report: &mut ValidationReport,
    ) {
        if unlock.song_id.trim().is_empty() {
            report.add_error("unlock condition is missing a song id");
            return;
        }

        if !song_ids.contains(unlock.song_id.as_str()) {
            report.add_warning(format!(
                "unlock condition references a song that does not exist: {}",
                unlock.song_id
            ));
        }
    }

    fn validate_consistency(&self, pack_ids: &HashSet<&str>, report: &mut ValidationReport) {
        let catalog = self.catalog;

        // The dangling pack reference is reported here as well as in the
        // per-song pass; the two findings serve different record contexts.
        for song in &catalog.songs {
            if !song.set.trim().is_empty() && !pack_ids.contains(song.set.as_str()) {
                report.add_warning(format!(
                    "song '{}' references a pack that does not exist: {}",
                    song.id, song.set
                ));
            }
        }

        // One error per duplicated id, in first-encounter order.
        report_duplicates(
            catalog.songs.iter().map(|song| song.id.as_str()),
            "duplicate song id",
            report,
        );
        report_duplicates(
            catalog.packs.iter().map(|pack| pack.id.as_str()),
            "duplicate pack id",
            report,
        );
    }

    fn validate_folder_existence(&self, folders: &HashSet<String>, report: &mut ValidationReport) {
        let mut matching_folders = 0;
        let mut dl_folders = 0;
        let mut missing_folders = 0;

        for song in &self.catalog.songs {
            if folders.contains(&song.id) {
                matching_folders += 1;
                continue;
            }

            let dl_name = format!("{}{}", DL_FOLDER_PREFIX, song.id);
            if folders.contains(&dl_name) {
                dl_folders += 1;
                matching_folders += 1;
                continue;
            }

            missing_folders += 1;
            report.add_warning(format!(
                "song '{}' has no matching folder (checked: {} or {})",
                song.id, song.id, dl_name
            ));
        }

        report.statistics = Some(FolderStatistics {
            songs_in_list: self.catalog.songs.len(),
            folders_found: folders.len(),
            dl_folders,
            matching_folders,
            missing_folders,
        });
    }
}

fn report_duplicates<'i>(
    ids: impl Iterator<Item = &'i str> + Clone,
    label: &str,
    report: &mut ValidationReport,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in ids.clone() {
        *counts.entry(id).or_default() += 1;
    }

    let mut reported: HashSet<&str> = HashSet::new();
    for id in ids {
        if counts[id] > 1 && reported.insert(id) {
            report.add_error(format!("{}: {}", label, id));
        }
    }
}

/// The outcome of one validation run.
///
/// Errors mark conditions that make the catalog unusable; warnings are
/// advisory. The split is a design choice, not a severity scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,

    /// Present only when the folder pass ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<FolderStatistics>,
}

impl ValidationReport {
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// A catalog is valid when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Renders a human-readable summary: up to five entries per list with an
    /// overflow count, then the folder statistics when present.
    pub fn summary(&self) -> String {
        const SHOWN: usize = 5;

        let mut lines = Vec::new();

        if self.has_errors() {
            lines.push(format!("found {} errors:", self.errors.len()));
            for (index, error) in self.errors.iter().take(SHOWN).enumerate() {
                lines.push(format!("{}. {}", index + 1, error));
            }
            if self.errors.len() > SHOWN {
                lines.push(format!("... and {} more errors", self.errors.len() - SHOWN));
            }
        } else {
            lines.push("validation passed, no errors found".to_string());
        }

        if self.has_warnings() {
            lines.push(format!("found {} warnings:", self.warnings.len()));
            for (index, warning) in self.warnings.iter().take(SHOWN).enumerate() {
                lines.push(format!("{}. {}", index + 1, warning));
            }
            if self.warnings.len() > SHOWN {
                lines.push(format!(
                    "... and {} more warnings",
                    self.warnings.len() - SHOWN
                ));
            }
        }

        if let Some(statistics) = &self.statistics {
            lines.push(String::new());
            lines.push("folder statistics:".to_string());
            lines.push(format!("  songs in list: {}", statistics.songs_in_list));
            lines.push(format!("  folders found: {}", statistics.folders_found));
            lines.push(format!("  dl_ folders: {}", statistics.dl_folders));
            lines.push(format!(
                "  matching folders: {}",
                statistics.matching_folders
            ));
            lines.push(format!("  missing folders: {}", statistics.missing_folders));
            if statistics.missing_folders > 0 {
                lines.push(format!(
                    "warning: {} songs have no matching folder",
                    statistics.missing_folders
                ));
            }
        }

        lines.join("\n")
    }
}

/// Counters produced by the folder cross-check pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStatistics {
    /// Songs in the catalog.
    pub songs_in_list: usize,
    /// Folder names in the supplied set.
    pub folders_found: usize,
    /// Songs matched through the `dl_` prefix.
    pub dl_folders: usize,
    /// Songs with a matching folder, prefixed or not.
    pub matching_folders: usize,
    /// Songs with no matching folder.
    pub missing_folders: usize,
}
