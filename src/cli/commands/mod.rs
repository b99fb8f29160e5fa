//! One module per CLI action.

pub mod delete;
pub mod get;
pub mod list;
pub mod set;
