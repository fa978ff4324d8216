/// This module provides the `Codec` struct and associated functionality for
/// reading, writing, caching, and validating a content catalog. The `Codec`
/// struct manages the decoded `Catalog` assembled from the three manifest
/// files (`songlist`, `packlist`, `unlocks`) and supports manifest-type
/// inference from file names, directory-level load/save, and a JSON cache
/// form for the whole catalog.
///
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{
    error::Error,
    formats::{ManifestType, PacklistFormat, SonglistFormat, UnlocksFormat},
    traits::Parser,
    types::Catalog,
    validation::{ValidationReport, Validator},
};

/// Holds a decoded content catalog and provides methods to read, write,
/// cache, and validate it.
pub struct Codec {
    /// The catalog managed by this codec.
    pub catalog: Catalog,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Codec {
            catalog: Catalog::default(),
        }
    }

    /// Reads one manifest file given its path and explicit manifest type,
    /// replacing that section of the catalog.
    ///
    /// # Parameters
    /// - `path`: Path to the manifest file.
    /// - `manifest`: Which of the three manifests the file holds.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the file was successfully read and decoded,
    /// or an `Error` otherwise.
    pub fn read_file_by_type<P: AsRef<Path>>(
        &mut self,
        path: P,
        manifest: ManifestType,
    ) -> Result<(), Error> {
        let path = path.as_ref();

        match manifest {
            ManifestType::Songlist => {
                self.catalog.songs = SonglistFormat::read_from(path)?.into();
                debug!(manifest = %manifest, count = self.catalog.songs.len(), "manifest loaded");
            }
            ManifestType::Packlist => {
                self.catalog.packs = PacklistFormat::read_from(path)?.into();
                debug!(manifest = %manifest, count = self.catalog.packs.len(), "manifest loaded");
            }
            ManifestType::Unlocks => {
                self.catalog.unlocks = UnlocksFormat::read_from(path)?.into();
                debug!(manifest = %manifest, count = self.catalog.unlocks.len(), "manifest loaded");
            }
        }

        Ok(())
    }

    /// Reads a manifest file by inferring its type from the file name.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the file was successfully read, or an `Error` if the
    /// name matches no known manifest or reading fails.
    pub fn read_file_by_name<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let manifest = ManifestType::from_file_name(name)?;

        self.read_file_by_type(path, manifest)
    }

    /// Reads every manifest present in `dir`; missing files are skipped so
    /// a project with no `unlocks` file still loads.
    pub fn read_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<(), Error> {
        let dir = dir.as_ref();

        for manifest in [
            ManifestType::Songlist,
            ManifestType::Packlist,
            ManifestType::Unlocks,
        ] {
            let path = dir.join(manifest.file_name());
            if path.is_file() {
                self.read_file_by_type(&path, manifest)?;
            }
        }

        Ok(())
    }

    /// Writes all three manifests into `dir` under their canonical names.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all writes succeed, or an `Error` otherwise.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<(), Error> {
        let dir = dir.as_ref();

        SonglistFormat::from(self.catalog.songs.clone())
            .write_to(dir.join(ManifestType::Songlist.file_name()))?;
        PacklistFormat::from(self.catalog.packs.clone())
            .write_to(dir.join(ManifestType::Packlist.file_name()))?;
        UnlocksFormat::from(self.catalog.unlocks.clone())
            .write_to(dir.join(ManifestType::Unlocks.file_name()))?;

        debug!(dir = %dir.display(), "manifests written");
        Ok(())
    }

    /// Caches the current catalog to a single JSON file.
    ///
    /// # Parameters
    /// - `path`: Destination file path for the cache.
    ///
    /// # Returns
    ///
    /// `Ok(())` if caching succeeds, or an `Error` if file I/O or
    /// serialization fails.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = fs::File::create(path).map_err(Error::Io)?;
        serde_json::to_writer(&mut writer, &self.catalog).map_err(Error::Parse)?;
        Ok(())
    }

    /// Loads a catalog from a JSON cache file.
    ///
    /// # Returns
    ///
    /// `Ok(Codec)` with the loaded catalog, or an `Error` if loading or
    /// deserialization fails.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut reader = fs::File::open(path).map_err(Error::Io)?;
        let catalog: Catalog = serde_json::from_reader(&mut reader).map_err(Error::Parse)?;
        Ok(Codec { catalog })
    }

    /// Validates the loaded catalog without folder data. Build a
    /// [`Validator`] directly to supply a folder-name set.
    pub fn validate(&self, strict: bool) -> ValidationReport {
        Validator::new(&self.catalog).validate_all(strict)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the set of song asset folder names directly under `dir`.
///
/// This is the directory-listing collaborator for the validator's folder
/// pass; the validator itself never touches the filesystem.
pub fn song_folder_names<P: AsRef<Path>>(dir: P) -> Result<HashSet<String>, Error> {
    let mut names = HashSet::new();

    for entry in fs::read_dir(dir).map_err(Error::Io)? {
        let entry = entry.map_err(Error::Io)?;
        if entry.file_type().map_err(Error::Io)?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.insert(name.to_string());
            }
        }
    }

    Ok(names)
}
