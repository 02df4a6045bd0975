//! Response collection for a single stage

pub mod response;

pub use response::{Response, ResponseSet};
