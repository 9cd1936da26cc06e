use log::debug;

use super::image::ByteImage;
use crate::error::{DecodeError, Result};

/// Base of program/data memory on the target machines; the database always lives above it
pub const DEFAULT_SEARCH_START: usize = 16384;

/// Offset of the last byte the marker test looks at
const SIGNATURE_SPAN: usize = 10;

/// Check whether the marker `17, 18, 19, 20, 21` sits at every other byte after `addr`
fn matches_at(image: &ByteImage, addr: usize) -> bool {
    (1..=5).all(|i| image.get(addr + 2 * i) == Some(16 + i as u8))
}

/// Find the lowest offset at or after `search_start` carrying the database signature
pub fn locate_signature(image: &ByteImage, search_start: usize) -> Result<usize> {
    let found = (search_start..image.len())
        .take_while(|addr| addr + SIGNATURE_SPAN < image.len())
        .find(|&addr| matches_at(image, addr));

    match found {
        Some(addr) => {
            debug!("Database signature found at {:#06x}", addr);
            Ok(addr)
        }
        None => {
            debug!(
                "No database signature between {:#06x} and {:#06x}",
                search_start,
                image.len()
            );
            Err(DecodeError::SignatureNotFound { search_start })
        }
    }
}
