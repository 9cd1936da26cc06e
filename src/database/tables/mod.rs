pub mod connections;
pub mod vocabulary;

pub use self::connections::*;
pub use self::vocabulary::*;
