//! The `unlocks` manifest: the conditions gating song availability.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::UnlockEntry};

/// Wire form of the `unlocks` file: one object holding an `unlocks` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Format {
    #[serde(default)]
    pub unlocks: Vec<UnlockEntry>,
}

impl Parser for Format {
    /// Parses the unlocks manifest from a reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Serializes the unlocks manifest to a writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }
}

impl From<Format> for Vec<UnlockEntry> {
    fn from(format: Format) -> Self {
        format.unlocks
    }
}

impl From<Vec<UnlockEntry>> for Format {
    fn from(unlocks: Vec<UnlockEntry>) -> Self {
        Format { unlocks }
    }
}
