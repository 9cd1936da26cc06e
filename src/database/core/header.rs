use std::fmt;

use log::debug;

use super::image::ByteImage;
use crate::error::{Result, Table};

/// Distance from the signature anchor to the first header byte
pub const HEADER_OFFSET: usize = 13;

/// Counts and resolved table offsets from the database header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Offset of the signature the header was found from
    pub signature: usize,
    pub n_objects_carried: u8,
    pub n_objects: u8,
    pub n_locations: u8,
    pub n_messages: u8,
    pub responses: usize,
    pub processes: usize,
    pub objects: usize,
    pub locations: usize,
    pub messages: usize,
    pub connections: usize,
    pub vocabulary: usize,
    pub object_positions: usize,
}

impl Header {
    /// Read the header anchored at `signature`.
    ///
    /// The string and connection fields hold the address of a pointer cell,
    /// which is followed once more; the rest point straight at their tables.
    pub fn read(image: &ByteImage, signature: usize) -> Result<Header> {
        let base = signature + HEADER_OFFSET;
        let field = |n: usize| -> Result<usize> {
            image
                .word(base + 4 + 2 * n, Table::Header)
                .map(|w| w as usize)
        };
        let indirect = |n: usize, table: Table| -> Result<usize> {
            let cell = field(n)?;
            image.word(cell, table).map(|w| w as usize)
        };

        let header = Header {
            signature,
            n_objects_carried: image.byte(base, Table::Header)?,
            n_objects: image.byte(base + 1, Table::Header)?,
            n_locations: image.byte(base + 2, Table::Header)?,
            n_messages: image.byte(base + 3, Table::Header)?,
            responses: field(0)?,
            processes: field(1)?,
            objects: indirect(2, Table::Objects)?,
            locations: indirect(3, Table::Locations)?,
            messages: indirect(4, Table::Messages)?,
            connections: indirect(5, Table::Connections)?,
            vocabulary: field(6)?,
            object_positions: field(7)?,
        };

        debug!(
            "Header at {:#06x}: {} objects ({} carried), {} locations, {} messages",
            base, header.n_objects, header.n_objects_carried, header.n_locations, header.n_messages
        );
        Ok(header)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "
Signature address:        {:#06x}
Objects carried:          {}
Number of objects:        {}
Number of locations:      {}
Number of messages:       {}
Response table:           {:#06x}
Process table:            {:#06x}
Object descriptions:      {:#06x}
Location descriptions:    {:#06x}
Message table:            {:#06x}
Connection table:         {:#06x}
Vocabulary:               {:#06x}
Initial positions:        {:#06x}
",
            self.signature,
            self.n_objects_carried,
            self.n_objects,
            self.n_locations,
            self.n_messages,
            self.responses,
            self.processes,
            self.objects,
            self.locations,
            self.messages,
            self.connections,
            self.vocabulary,
            self.object_positions,
        )
    }
}
