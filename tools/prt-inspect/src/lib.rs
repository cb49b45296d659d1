//! # PRT Inspect
//!
//! Command-line inspection of Probabilistic Reveal Token headers.
//!
//! - `config`: Layered settings (defaults, TOML file, environment, flags)
//! - `logging`: `tracing-subscriber` setup on stderr
//! - `report`: Text and JSON rendering of a decoded token

pub mod config;
pub mod logging;
pub mod report;
