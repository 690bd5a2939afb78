//! Concrete implementations of the port traits.
//!
//! | Adapter         | Implements         | Connects to               |
//! |-----------------|--------------------|---------------------------|
//! | `memory`        | SecurityRepository | Process memory            |
//! | `json_store`    | SecurityRepository | JSON state file on disk   |
//! | `fake_detector` | ImageDetector      | Seeded RNG (no real model)|
//! | `log_sink`      | EventSink          | `log` facade              |

pub mod fake_detector;
pub mod json_store;
pub mod log_sink;
pub mod memory;
