pub mod header;
pub mod image;
pub mod signature;

pub use self::header::*;
pub use self::image::*;
pub use self::signature::*;
