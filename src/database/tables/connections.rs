use indexmap::IndexMap;
use log::{debug, trace};

use crate::database::core::ByteImage;
use crate::error::{Result, Table};

/// Direction byte that closes a location's exit list
const END_OF_EXITS: u8 = 0xff;

/// Read the exit lists of `n_locations` locations packed from `addr`.
///
/// Each list is a run of `(direction, destination)` byte pairs closed by
/// `0xFF`; the next list starts right after it.
pub fn read_connections(
    image: &ByteImage,
    addr: usize,
    n_locations: usize,
) -> Result<Vec<IndexMap<u8, u8>>> {
    let mut ptr = addr;
    let mut connections = Vec::with_capacity(n_locations);

    for location in 0..n_locations {
        let mut exits = IndexMap::new();
        loop {
            let direction = image.byte(ptr, Table::Connections)?;
            if direction == END_OF_EXITS {
                ptr += 1;
                break;
            }
            let destination = image.byte(ptr + 1, Table::Connections)?;
            exits.insert(direction, destination);
            ptr += 2;
        }
        trace!("Location {}: {} exits", location, exits.len());
        connections.push(exits);
    }

    debug!(
        "Read exits for {} locations at {:#06x}",
        connections.len(),
        addr
    );
    Ok(connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_exits_per_location() {
        let memory = [1, 2, 3, 4, 0xff, 0xff, 2, 0, 0xff];
        let image = ByteImage::new(&memory);
        let connections = read_connections(&image, 0, 3).unwrap();

        assert_eq!(connections.len(), 3);
        assert_eq!(connections[0].get(&1), Some(&2));
        assert_eq!(connections[0].get(&3), Some(&4));
        assert!(connections[1].is_empty());
        assert_eq!(connections[2].get(&2), Some(&0));
    }

    #[test]
    fn test_no_locations() {
        let image = ByteImage::new(&[]);
        assert!(read_connections(&image, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_table() {
        let memory = [1, 2, 0xff, 5];
        let image = ByteImage::new(&memory);
        assert!(matches!(
            read_connections(&image, 0, 2),
            Err(DecodeError::MalformedTable {
                table: Table::Connections,
                offset: 4
            })
        ));
    }
}
