pub mod core;
pub mod game_data;
pub mod rules;
pub mod tables;
pub mod text;

pub use self::game_data::*;
