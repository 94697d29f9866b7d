//! Data Transfer Objects - For API boundaries
//!
//! Request bodies and response envelopes of the HTTP adapter. Analysis results
//! themselves are serialized straight from the domain.

pub mod analysis;

pub use analysis::*;
