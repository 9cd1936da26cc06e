use crate::error::{DecodeError, Result, Table};

/// Read-only view over a memory image with bounds-checked reads.
///
/// Every read names the table being decoded so an out-of-range access
/// surfaces as `MalformedTable` for that table instead of a panic.
#[derive(Debug, Clone, Copy)]
pub struct ByteImage<'a> {
    memory: &'a [u8],
}

impl<'a> ByteImage<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        ByteImage { memory }
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Plain lookup for scans where running off the end is not an error
    pub fn get(&self, addr: usize) -> Option<u8> {
        self.memory.get(addr).copied()
    }

    pub fn byte(&self, addr: usize, table: Table) -> Result<u8> {
        self.get(addr)
            .ok_or(DecodeError::MalformedTable { table, offset: addr })
    }

    /// Little-endian 16-bit word: `mem[addr] + 256 * mem[addr + 1]`
    pub fn word(&self, addr: usize, table: Table) -> Result<u16> {
        let lo = self.byte(addr, table)?;
        let hi = self.byte(addr + 1, table)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn slice(&self, addr: usize, len: usize, table: Table) -> Result<&'a [u8]> {
        // Report the first byte that is missing
        let end = addr.checked_add(len).ok_or(DecodeError::MalformedTable {
            table,
            offset: addr,
        })?;
        self.memory
            .get(addr..end)
            .ok_or(DecodeError::MalformedTable {
                table,
                offset: end.min(self.memory.len().max(addr)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_little_endian() {
        let memory = [0x34, 0x12, 0xff];
        let image = ByteImage::new(&memory);
        assert_eq!(image.word(0, Table::Header).unwrap(), 0x1234);
        assert_eq!(image.word(1, Table::Header).unwrap(), 0xff12);
    }

    #[test]
    fn test_out_of_range_reports_table_and_offset() {
        let memory = [1, 2, 3];
        let image = ByteImage::new(&memory);
        match image.word(2, Table::Vocabulary) {
            Err(DecodeError::MalformedTable { table, offset }) => {
                assert_eq!(table, Table::Vocabulary);
                assert_eq!(offset, 3);
            }
            other => panic!("expected MalformedTable, got {:?}", other),
        }
    }

    #[test]
    fn test_slice_bounds() {
        let memory = [1, 2, 3, 4];
        let image = ByteImage::new(&memory);
        assert_eq!(image.slice(1, 3, Table::Objects).unwrap(), &[2, 3, 4]);
        assert!(image.slice(2, 3, Table::Objects).is_err());
    }
}
