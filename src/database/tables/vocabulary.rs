use indexmap::IndexMap;
use log::{debug, trace};

use crate::database::core::ByteImage;
use crate::error::{Result, Table};

const WORD_LENGTH: usize = 4;
const RECORD_SIZE: usize = WORD_LENGTH + 1;

/// Read the vocabulary table at `addr`.
///
/// Each record is four inverted characters followed by the token value. The
/// table ends at the first record with token 0, which is not included. A word
/// that appears twice keeps its first position but takes the later token.
pub fn read_vocabulary(image: &ByteImage, addr: usize) -> Result<IndexMap<String, u8>> {
    let mut vocabulary = IndexMap::new();
    let mut ptr = addr;

    loop {
        let token = image.byte(ptr + WORD_LENGTH, Table::Vocabulary)?;
        if token == 0 {
            break;
        }
        let word: String = image
            .slice(ptr, WORD_LENGTH, Table::Vocabulary)?
            .iter()
            .map(|b| char::from(255 - b))
            .collect();
        let word = word.trim().to_string();

        trace!("Vocabulary {:#06x}: {:?} = {}", ptr, word, token);
        if let Some(previous) = vocabulary.insert(word, token) {
            trace!("Token {} replaced by {} for duplicate word", previous, token);
        }
        ptr += RECORD_SIZE;
    }

    debug!("Read {} vocabulary words at {:#06x}", vocabulary.len(), addr);
    Ok(vocabulary)
}
