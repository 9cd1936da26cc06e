use log::{debug, trace};

use super::charset::{substitution, INK_COLOURS};
use crate::database::core::ByteImage;
use crate::error::{Result, Table};

/// Screen width in characters; text is re-wrapped at this column
pub const LINE_WIDTH: usize = 32;

/// Control codes after inversion
const CODE_NEWLINE: u8 = 0x06;
const CODE_INK: u8 = 0x10;
const CODE_PAPER: u8 = 0x11;
const CODE_END: u8 = 0x1f;

/// Decoder state for a single string
struct TextState {
    cursor: usize,
    text: String,
    line_length: usize,
}

impl TextState {
    fn new(addr: usize) -> Self {
        TextState {
            cursor: addr,
            text: String::new(),
            line_length: 0,
        }
    }

    /// Read the next stored byte, inverted
    fn next_code(&mut self, image: &ByteImage, table: Table) -> Result<u8> {
        let b = image.byte(self.cursor, table)?;
        self.cursor += 1;
        Ok(255 - b)
    }

    /// Append one visible character (or substitution), wrapping at the screen width
    fn push(&mut self, fragment: &str) {
        if self.line_length == LINE_WIDTH {
            if !fragment.ends_with(' ') {
                self.text.push(' ');
            }
            self.line_length = 0;
        }
        self.text.push_str(fragment);
        self.line_length += 1;
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push(c.encode_utf8(&mut buf));
    }
}

/// Decode one string starting at `addr`.
///
/// Returns the markup text and the offset just past its terminator, so
/// strings packed back to back can be read in sequence.
pub fn decode_string(image: &ByteImage, addr: usize, table: Table) -> Result<(String, usize)> {
    let mut state = TextState::new(addr);

    loop {
        let code = state.next_code(image, table)?;

        if let Some(repl) = substitution(code) {
            state.push(repl);
            continue;
        }

        match code {
            CODE_END => break,
            32..=255 => state.push_char(char::from(code)),
            CODE_NEWLINE => {
                // Two newlines in a row make a paragraph break
                if 255 - image.byte(state.cursor, table)? == CODE_NEWLINE {
                    state.push("<p>");
                    state.cursor += 1;
                } else {
                    state.push(" ");
                }
                state.line_length = 0;
            }
            CODE_INK => {
                let colour = state.next_code(image, table)?;
                if let Some(css) = INK_COLOURS.get(colour as usize) {
                    state.text.push_str("<font color=");
                    state.text.push_str(css);
                    state.text.push('>');
                } else {
                    trace!("Ignoring ink colour {} at {:#06x}", colour, state.cursor - 1);
                }
            }
            CODE_PAPER => {
                let paper = state.next_code(image, table)?;
                trace!("Skipping paper colour {} at {:#06x}", paper, state.cursor - 1);
            }
            _ => {
                trace!("Ignoring control code {:#04x} at {:#06x}", code, state.cursor - 1);
            }
        }
    }

    trace!(
        "Decoded string at {:#06x}..{:#06x}: {:?}",
        addr,
        state.cursor,
        state.text
    );
    Ok((state.text, state.cursor))
}

/// Decode `count` strings packed contiguously from `addr`
pub fn decode_strings(
    image: &ByteImage,
    addr: usize,
    count: usize,
    table: Table,
) -> Result<Vec<String>> {
    let mut strings = Vec::with_capacity(count);
    let mut cursor = addr;
    for _ in 0..count {
        let (text, next) = decode_string(image, cursor, table)?;
        strings.push(text);
        cursor = next;
    }
    debug!(
        "Decoded {} strings for {} ({:#06x}..{:#06x})",
        count, table, addr, cursor
    );
    Ok(strings)
}
