//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements            | Connects to                   |
//! |----------------|-----------------------|-------------------------------|
//! | `time`         | ClockPort             | `std::time::Instant` / manual |
//! | `log_sink`     | EventSink             | `log` facade                  |
//! | `sim`          | ModePort + InputPort  | scripted match timeline       |
//! |                | ActuatorPort          | recording motor bus           |
//! | `config_store` | ConfigPort            | JSON file / in-memory store   |

pub mod config_store;
pub mod log_sink;
pub mod sim;
pub mod time;
