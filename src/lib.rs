//! Decoder for Quill adventure databases held in a memory snapshot.
//!
//! The database is found by its signature, then the header's tables are
//! decoded into a [`GameData`]: location, object and message texts, the
//! response and process command tables, the vocabulary and the exits.

#[macro_use]
extern crate lazy_static;

pub mod database;
pub mod error;
pub mod options;

pub use database::GameData;
pub use error::{DecodeError, Result, Table};
pub use options::DecoderOptions;

/*
Header layout, relative to the signature anchor S
        S+2 .. S+10  signature bytes 17 18 19 20 21 (every other byte)
        S+13         objects initially carried
        S+14         number of objects
        S+15         number of locations
        S+16         number of messages
        S+17         response table
        S+19         process table
        S+21         -> object text pointer cell
        S+23         -> location text pointer cell
        S+25         -> message text pointer cell
        S+27         -> connection table pointer cell
        S+29         vocabulary
        S+31         initial object positions
*/
