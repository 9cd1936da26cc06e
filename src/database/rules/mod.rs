pub mod bytecode;
pub mod commands;

pub use self::bytecode::*;
pub use self::commands::*;
