use std::fmt;

use log::trace;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::database::core::ByteImage;
use crate::error::{DecodeError, Result, Table};

/// Opcode byte that ends a condition list or an action chain
pub const END_OF_LIST: u8 = 0xff;

/// Conditions above this opcode carry a second parameter
const LAST_ONE_PARAM_CONDITION: u8 = 12;

/// Maps an action opcode to the number of parameter bytes that follow it.
///
/// The count depends on the database version that produced the image.
pub trait ArgumentTable {
    fn action_arguments(&self, opcode: u8) -> usize;
}

/// Database versions with a known action argument table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseVersion {
    V0,
}

impl DatabaseVersion {
    pub fn from_number(version: u8) -> Result<Self> {
        match version {
            0 => Ok(DatabaseVersion::V0),
            _ => Err(DecodeError::UnsupportedVariant { version }),
        }
    }
}

impl ArgumentTable for DatabaseVersion {
    fn action_arguments(&self, opcode: u8) -> usize {
        match self {
            DatabaseVersion::V0 => match opcode {
                0..=10 => 0,
                11..=19 | 21 | 22 => 1,
                _ => 2,
            },
        }
    }
}

/// A single test in a command's condition list
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Condition {
    pub opcode: u8,
    pub param1: u8,
    /// Only present for opcodes above 12
    pub param2: Option<u8>,
}

/// One step of an action chain; owns the rest of the chain.
///
/// Chains can run to tens of thousands of nodes (every zero byte is an
/// action), so cloning, comparing, formatting and dropping walk the chain
/// in a loop rather than recursing through `next`.
pub struct Action {
    pub opcode: u8,
    pub param1: Option<u8>,
    pub param2: Option<u8>,
    pub next: Option<Box<Action>>,
}

impl Action {
    pub fn iter(&self) -> ActionIter<'_> {
        ActionIter {
            current: Some(self),
        }
    }

    /// Number of actions from this one to the end of the chain
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    fn record(&self) -> ActionRecord {
        ActionRecord {
            opcode: self.opcode,
            param1: self.param1,
            param2: self.param2,
        }
    }
}

/// Link records into a chain from the tail, so each node owns its successor
fn link_actions(records: Vec<ActionRecord>) -> Option<Box<Action>> {
    records.into_iter().rev().fold(None, |next, record| {
        Some(Box::new(Action {
            opcode: record.opcode,
            param1: record.param1,
            param2: record.param2,
            next,
        }))
    })
}

impl Drop for Action {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut action) = next {
            next = action.next.take();
        }
    }
}

impl Clone for Action {
    fn clone(&self) -> Self {
        Action {
            opcode: self.opcode,
            param1: self.param1,
            param2: self.param2,
            next: link_actions(self.iter().skip(1).map(Action::record).collect()),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.iter().map(Action::record).eq(other.iter().map(Action::record))
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Action::record)).finish()
    }
}

pub struct ActionIter<'a> {
    current: Option<&'a Action>,
}

impl<'a> Iterator for ActionIter<'a> {
    type Item = &'a Action;

    fn next(&mut self) -> Option<Self::Item> {
        let action = self.current?;
        self.current = action.next.as_deref();
        Some(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.opcode)?;
        for p in [self.param1, self.param2].into_iter().flatten() {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{} {}", self.opcode, self.param1)?;
        if let Some(p) = self.param2 {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}

/// Flat view of one action; the chain link becomes sequence order
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
struct ActionRecord {
    opcode: u8,
    param1: Option<u8>,
    param2: Option<u8>,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.chain_len()))?;
        for action in self.iter() {
            seq.serialize_element(&action.record())?;
        }
        seq.end()
    }
}

/// Read a condition list starting at `addr`.
///
/// Returns the conditions and the offset just past the terminator, where
/// the action chain begins.
pub fn read_conditions(
    image: &ByteImage,
    addr: usize,
    table: Table,
) -> Result<(Vec<Condition>, usize)> {
    let mut conditions = Vec::new();
    let mut ptr = addr;

    loop {
        let at = ptr;
        let opcode = image.byte(ptr, table)?;
        if opcode == END_OF_LIST {
            ptr += 1;
            break;
        }
        let param1 = image.byte(ptr + 1, table)?;
        let condition = if opcode > LAST_ONE_PARAM_CONDITION {
            let param2 = image.byte(ptr + 2, table)?;
            ptr += 3;
            Condition {
                opcode,
                param1,
                param2: Some(param2),
            }
        } else {
            ptr += 2;
            Condition {
                opcode,
                param1,
                param2: None,
            }
        };
        trace!("Condition at {:#06x}: {}", at, condition);
        conditions.push(condition);
    }

    Ok((conditions, ptr))
}

/// Read an action chain starting at `addr` using the given argument table
pub fn read_actions(
    image: &ByteImage,
    addr: usize,
    arguments: &dyn ArgumentTable,
    table: Table,
) -> Result<Option<Box<Action>>> {
    let mut records = Vec::new();
    let mut ptr = addr;

    loop {
        let opcode = image.byte(ptr, table)?;
        if opcode == END_OF_LIST {
            break;
        }
        let n_args = arguments.action_arguments(opcode);
        let param1 = if n_args >= 1 {
            Some(image.byte(ptr + 1, table)?)
        } else {
            None
        };
        let param2 = if n_args >= 2 {
            Some(image.byte(ptr + 2, table)?)
        } else {
            None
        };
        records.push(ActionRecord {
            opcode,
            param1,
            param2,
        });
        ptr += 1 + n_args;
    }

    Ok(link_actions(records))
}

/// Read the condition list and action chain of one command block
pub fn read_conditions_actions(
    image: &ByteImage,
    addr: usize,
    arguments: &dyn ArgumentTable,
    table: Table,
) -> Result<(Vec<Condition>, Option<Box<Action>>)> {
    let (conditions, action_addr) = read_conditions(image, addr, table)?;
    let actions = read_actions(image, action_addr, arguments, table)?;
    Ok((conditions, actions))
}
