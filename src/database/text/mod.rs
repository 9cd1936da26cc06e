pub mod charset;
pub mod text;

pub use self::text::*;
