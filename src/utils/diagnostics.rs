//! System Diagnostics
//!
//! Runtime environment reporting for debugging startup problems.

use std::path::PathBuf;
use sysinfo::System;
use tracing::{info, warn};

use crate::config::types::BusType;
use crate::config::Config;

/// System information for diagnostics
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// Operating system name (e.g., "Linux", "Ubuntu")
    pub os_name: String,
    /// Operating system version string
    pub os_version: String,

    /// Kernel version string
    pub kernel_version: String,

    /// Number of logical CPU cores
    pub cpu_count: usize,

    /// Total system memory in megabytes
    pub total_memory_mb: u64,

    /// System hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Gather system information
    pub fn gather() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();

        Self {
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / 1024 / 1024,
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// Log system information
    pub fn log(&self) {
        info!("=== System Information ===");
        info!("  OS: {} {}", self.os_name, self.os_version);
        info!("  Kernel: {}", self.kernel_version);
        info!("  Hostname: {}", self.hostname);
        info!("  CPUs: {}", self.cpu_count);
        info!("  Memory: {} MB", self.total_memory_mb);
    }
}

/// Locate an executable on `PATH`
///
/// Paths containing a `/` are checked as-is.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return path.is_file().then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Log complete diagnostics on startup
pub fn log_startup_diagnostics(config: &Config) {
    info!("╔════════════════════════════════════════════════════════════╗");
    info!("║          Startup Diagnostics                              ║");
    info!("╚════════════════════════════════════════════════════════════╝");

    SystemInfo::gather().log();

    info!("=== Environment ===");
    match config.bus.connection {
        BusType::Session => match std::env::var("DBUS_SESSION_BUS_ADDRESS") {
            Ok(address) => info!("  Session bus: {}", address),
            Err(_) => warn!("  Session bus: DBUS_SESSION_BUS_ADDRESS not set"),
        },
        BusType::System => info!("  Bus: system"),
    }

    match std::env::var("DISPLAY") {
        Ok(value) => info!("  X display: {}", value),
        Err(_) => info!("  X display: not set"),
    }

    if config.actions.enabled {
        match find_in_path(&config.actions.command) {
            Some(path) => info!("  Action command: {}", path.display()),
            None => warn!(
                "  Action command: '{}' not found in PATH",
                config.actions.command
            ),
        }
    } else {
        info!("  Action command: disabled");
    }

    info!("=== Daemon Configuration ===");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "  Thresholds: drag {}px, long press {}ms",
        config.gesture.drag_threshold_px, config.gesture.long_press_ms
    );
    #[cfg(debug_assertions)]
    info!("  Build: debug");
    #[cfg(not(debug_assertions))]
    info!("  Build: release");

    info!("╚════════════════════════════════════════════════════════════╝");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_info_gather() {
        let info = SystemInfo::gather();
        assert!(!info.os_name.is_empty());
        assert!(info.cpu_count > 0);
    }

    #[test]
    fn test_find_in_path() {
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("definitely-not-a-real-program-1234").is_none());
    }

    #[test]
    fn test_log_startup_diagnostics_with_defaults() {
        log_startup_diagnostics(&Config::default());

        let mut config = Config::default();
        config.bus.connection = BusType::System;
        config.actions.enabled = false;
        log_startup_diagnostics(&config);
    }

    #[test]
    fn test_find_in_path_explicit_path() {
        assert!(find_in_path("/nonexistent/xdotool").is_none());
    }
}
