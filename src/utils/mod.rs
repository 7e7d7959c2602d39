//! Utility Functions and Diagnostics
//!
//! Startup diagnostics and user-friendly error formatting.
//!
//! ## Diagnostics
//!
//! The [`diagnostics`] module describes the runtime environment the daemon
//! depends on: the host, the session bus address, the X display used by the
//! input synthesis program, and whether that program is on `PATH`.
//!
//! ```rust
//! use touch_gestured::utils::{find_in_path, SystemInfo};
//!
//! let sys_info = SystemInfo::gather();
//! sys_info.log();
//!
//! if find_in_path("xdotool").is_none() {
//!     eprintln!("key chords will fail");
//! }
//! ```
//!
//! ## Error Formatting
//!
//! The [`errors`] module turns a startup failure into a boxed message with
//! troubleshooting hints:
//!
//! - D-Bus errors → session bus address, name already owned, policy files
//! - Config errors → TOML syntax, thresholds, binding directions
//! - Input errors → file paths, JSON-lines record format
//! - Action errors → missing `xdotool`, no X display

pub mod diagnostics;
pub mod errors;

pub use diagnostics::{find_in_path, log_startup_diagnostics, SystemInfo};
pub use errors::format_user_error;
