//! The `packlist` manifest: the content packs songs are sold under.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Pack};

/// Wire form of the `packlist` file: one object holding a `packs` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Format {
    #[serde(default)]
    pub packs: Vec<Pack>,
}

impl Parser for Format {
    /// Parses the packlist manifest from a reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Serializes the packlist manifest to a writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }
}

impl From<Format> for Vec<Pack> {
    fn from(format: Format) -> Self {
        format.packs
    }
}

impl From<Vec<Pack>> for Format {
    fn from(packs: Vec<Pack>) -> Self {
        Format { packs }
    }
}
