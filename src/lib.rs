//! KitBot control library.
//!
//! The control-decision core of a competition robot: a mode scheduler
//! that runs once per tick, a time-gated autonomous sequencer and a
//! first-match teleop input mapper.  Platform access goes through the
//! port traits in [`app::ports`]; [`adapters`] holds host-side
//! implementations for simulation and tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod autonomous;
pub mod config;
pub mod error;
pub mod input;
pub mod mode;
pub mod output;
pub mod scheduler;
pub mod teleop;
