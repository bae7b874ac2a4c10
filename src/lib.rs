//! Universal Grocery Manager (UGM) Library
//!
//! Core functionality for grocery lists, store route sorting, and recipes.

pub mod build_info;
pub mod db;
pub mod mcp;
pub mod models;
pub mod quantity;
pub mod route;
pub mod tools;
