//! # Domain Layer
//!
//! Pure token decoding logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod codec;
pub mod config;
pub mod curve;
pub mod decrypt;
pub mod entities;
pub mod errors;
pub mod mac;
pub mod payload;
pub mod signal;
