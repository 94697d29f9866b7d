//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: REST API routes
//! - D&D 5e API: creature rating lookup
//! - Memo cache: in-process memoization for the analyzers
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod dnd5e_api;
pub mod http;
pub mod memo_cache;
pub mod state;
