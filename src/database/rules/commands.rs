use std::fmt;

use log::{debug, trace};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::bytecode::{read_conditions_actions, Action, ArgumentTable, Condition};
use crate::database::core::ByteImage;
use crate::error::{Result, Table};

/// Selector word stored in every process entry
pub const ANY_WORD: u8 = 255;

/// Size of one command record: two selector bytes and a block pointer
const RECORD_SIZE: usize = 4;

/// Which of the two command tables is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Matched against the player's verb and noun
    Response,
    /// Run every turn; selector words are not stored meaningfully
    Process,
}

impl CommandKind {
    fn table(self) -> Table {
        match self {
            CommandKind::Response => Table::Responses,
            CommandKind::Process => Table::Processes,
        }
    }
}

/// One entry of a command table; owns the rest of the table.
///
/// Like `Action`, the chain is cloned, compared, formatted and dropped
/// in a loop.
pub struct Command {
    pub word1: u8,
    pub word2: u8,
    pub conditions: Vec<Condition>,
    pub action: Option<Box<Action>>,
    pub next: Option<Box<Command>>,
}

impl Command {
    pub fn iter(&self) -> CommandIter<'_> {
        CommandIter {
            current: Some(self),
        }
    }

    /// Number of commands from this one to the end of the table
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.action.as_deref().into_iter().flat_map(|a| a.iter())
    }

    fn record(&self) -> CommandRecord<'_> {
        CommandRecord {
            word1: self.word1,
            word2: self.word2,
            conditions: &self.conditions,
            actions: self.action.as_deref(),
        }
    }
}

type Entry = (u8, u8, Vec<Condition>, Option<Box<Action>>);

/// Link entries into a chain from the tail
fn link_commands(entries: Vec<Entry>) -> Option<Box<Command>> {
    entries
        .into_iter()
        .rev()
        .fold(None, |next, (word1, word2, conditions, action)| {
            Some(Box::new(Command {
                word1,
                word2,
                conditions,
                action,
                next,
            }))
        })
}

impl Drop for Command {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut command) = next {
            next = command.next.take();
        }
    }
}

impl Clone for Command {
    fn clone(&self) -> Self {
        let rest = self
            .iter()
            .skip(1)
            .map(|c| (c.word1, c.word2, c.conditions.clone(), c.action.clone()))
            .collect();
        Command {
            word1: self.word1,
            word2: self.word2,
            conditions: self.conditions.clone(),
            action: self.action.clone(),
            next: link_commands(rest),
        }
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.iter().map(Command::record).eq(other.iter().map(Command::record))
    }
}

impl Eq for Command {}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Command::record)).finish()
    }
}

pub struct CommandIter<'a> {
    current: Option<&'a Command>,
}

impl<'a> Iterator for CommandIter<'a> {
    type Item = &'a Command;

    fn next(&mut self) -> Option<Self::Item> {
        let command = self.current?;
        self.current = command.next.as_deref();
        Some(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} {:>3} :", self.word1, self.word2)?;
        for c in &self.conditions {
            write!(f, " [{}]", c)?;
        }
        write!(f, " =>")?;
        for a in self.actions() {
            write!(f, " [{}]", a)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, serde::Serialize)]
struct CommandRecord<'a> {
    word1: u8,
    word2: u8,
    conditions: &'a [Condition],
    actions: Option<&'a Action>,
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.chain_len()))?;
        for command in self.iter() {
            seq.serialize_element(&command.record())?;
        }
        seq.end()
    }
}

/// Read a command table starting at `addr`.
///
/// A record whose first byte is zero ends the table. Process tables have
/// their selector words replaced with `ANY_WORD`.
pub fn read_commands(
    image: &ByteImage,
    addr: usize,
    kind: CommandKind,
    arguments: &dyn ArgumentTable,
) -> Result<Option<Box<Command>>> {
    let table = kind.table();
    let mut entries = Vec::new();
    let mut ptr = addr;

    while image.byte(ptr, table)? != 0 {
        let (word1, word2) = match kind {
            CommandKind::Response => (image.byte(ptr, table)?, image.byte(ptr + 1, table)?),
            CommandKind::Process => (ANY_WORD, ANY_WORD),
        };
        let block = image.word(ptr + 2, table)? as usize;
        let (conditions, action) = read_conditions_actions(image, block, arguments, table)?;
        trace!(
            "{:?} at {:#06x}: words {} {}, block {:#06x}, {} conditions",
            kind,
            ptr,
            word1,
            word2,
            block,
            conditions.len()
        );
        entries.push((word1, word2, conditions, action));
        ptr += RECORD_SIZE;
    }

    debug!("Read {} entries from {} at {:#06x}", entries.len(), table, addr);
    Ok(link_commands(entries))
}
