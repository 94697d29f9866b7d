//! Application layer - Use cases orchestrating the domain analyzers

pub mod dto;
pub mod ports;
pub mod services;
