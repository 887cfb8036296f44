//! Application boundary: port traits and outbound events.
//!
//! All interaction with the robot platform happens through the **port
//! traits** defined in [`ports`], keeping the control core fully testable
//! without real motor controllers or a driver station.

pub mod events;
pub mod ports;
