//! Application core: alarm decision logic with no I/O of its own.
//!
//! The [`service::SecurityService`] applies the rules from
//! [`crate::fsm::rules`] to incoming [`commands`] and reports what changed
//! as [`events`].  Persistence, detection and notification happen only
//! through the **port traits** in [`ports`], so this layer is fully
//! testable with mock adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
