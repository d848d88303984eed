pub mod filter;
pub mod labels;
pub mod overlay;
pub mod registry;
pub mod symbology;

pub use filter::*;
pub use overlay::*;
pub use registry::*;
