pub mod directory;
pub mod error;
pub mod record;

pub use directory::*;
pub use error::*;
pub use record::*;
