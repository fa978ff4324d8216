pub mod packlist;
pub mod songlist;
pub mod unlocks;

// Reexporting the formats for easier access
pub use packlist::Format as PacklistFormat;
pub use songlist::Format as SonglistFormat;
pub use unlocks::Format as UnlocksFormat;

use std::fmt;

use crate::error::Error;

/// The three manifest files that make up a content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestType {
    Songlist,
    Packlist,
    Unlocks,
}

impl ManifestType {
    /// Canonical file name. The game ships these without an extension.
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestType::Songlist => "songlist",
            ManifestType::Packlist => "packlist",
            ManifestType::Unlocks => "unlocks",
        }
    }

    /// Infers the manifest type from a file name.
    pub fn from_file_name(name: &str) -> Result<Self, Error> {
        match name {
            "songlist" => Ok(ManifestType::Songlist),
            "packlist" => Ok(ManifestType::Packlist),
            "unlocks" => Ok(ManifestType::Unlocks),
            _ => Err(Error::UnknownManifest(name.to_string())),
        }
    }
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
