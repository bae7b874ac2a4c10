//! UGM Tools module
//!
//! MCP tool implementations for the Universal Grocery Manager.

pub mod groceries;
pub mod recipes;
pub mod share;
pub mod status;
pub mod usuals;
