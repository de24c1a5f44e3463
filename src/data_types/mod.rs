pub mod axis;
pub mod data;

pub use axis::*;
pub use data::*;
