pub use crate::error::HcgenError;
pub use crate::transpile::{convert_script, Converted};

pub mod assertion;
pub mod cli;
pub mod collection;
pub mod error;
pub mod render;
pub mod scope;
pub mod transpile;
