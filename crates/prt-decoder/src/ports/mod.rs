//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: Decode pipeline that callers use
//! - **Outbound (Driven)**: Key lookup this crate needs

pub mod inbound;
pub mod outbound;
