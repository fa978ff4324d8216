//! The `songlist` manifest: every playable song with its difficulty slots.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Song};

/// Wire form of the `songlist` file: one object holding a `songs` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Format {
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Parser for Format {
    /// Parses the songlist manifest from a reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Serializes the songlist manifest to a writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }
}

impl From<Format> for Vec<Song> {
    fn from(format: Format) -> Self {
        format.songs
    }
}

impl From<Vec<Song>> for Format {
    fn from(songs: Vec<Song>) -> Self {
        Format { songs }
    }
}
