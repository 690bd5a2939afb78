//! Catpoint alarm controller library.
//!
//! Fuses binary sensor activations and a cat detector's verdicts into one
//! alarm status, gated by the arming mode.  The decision logic lives in
//! [`fsm`] and [`app::service`]; persistence, detection and notification
//! are reached through the port traits in [`app::ports`], so everything
//! here runs on the host with mock adapters.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod events;
pub mod fsm;
pub mod image;
pub mod sensor;

mod error;

pub use error::{Error, Result};
