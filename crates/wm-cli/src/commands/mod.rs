//! Command implementations

pub mod apply;
mod common;
pub mod compile;
pub mod status;
