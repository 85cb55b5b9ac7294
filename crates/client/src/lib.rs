//! Headless client for the bent-shot duel.
//!
//! The `duel` binary is the composition root: it loads configuration, sets up
//! logging, builds a [`runtime::Runtime`] and plays one match through the
//! runtime's public handle, printing every event.

pub mod config;
pub mod driver;
pub mod logging;
pub mod presentation;

pub use config::ClientConfig;
pub use driver::{HeadlessMatch, MatchSummary};
