//! MCP server layer for UGM

pub mod server;

pub use server::UgmService;
