//! Key-Chord Action Sink
//!
//! Maps encoded gesture tuples to input synthesis commands: native gestures
//! to a key chord (`xdotool key super+w`), a touch long-press to a
//! right-click (`xdotool click 3`). Commands are spawned directly with
//! `tokio::process`, never through a shell.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::error::{DispatchError, Result};
use super::ActionSink;
use crate::config::types::{ActionsConfig, GestureBinding};
use crate::protocol::GestureEvent;

/// Executes bound key chords and the long-press click
#[derive(Debug, Clone)]
pub struct KeyChordSink {
    command: String,
    bindings: Vec<GestureBinding>,
    long_press: Option<Vec<String>>,
}

impl KeyChordSink {
    /// Create a sink
    ///
    /// `long_press` holds the whitespace-separated arguments passed to
    /// `command` for a long-press (e.g. `"click 3"`); `None` leaves long-press
    /// without a local action.
    pub fn new(
        command: impl Into<String>,
        bindings: Vec<GestureBinding>,
        long_press: Option<&str>,
    ) -> Self {
        let long_press = long_press
            .map(|args| args.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|args| !args.is_empty());

        Self {
            command: command.into(),
            bindings,
            long_press,
        }
    }

    /// Build from the `[actions]` configuration section
    pub fn from_config(config: &ActionsConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.bindings.clone(),
            config.long_press.as_deref(),
        )
    }

    /// Command arguments for an event, if anything is bound to it
    pub fn resolve(&self, event: &GestureEvent) -> Option<Vec<String>> {
        if event.is_long_press() {
            return self.long_press.clone();
        }

        self.bindings
            .iter()
            .find(|binding| binding.matches(event))
            .map(|binding| vec!["key".to_string(), binding.keys.clone()])
    }
}

#[async_trait]
impl ActionSink for KeyChordSink {
    fn name(&self) -> &'static str {
        "key-chord"
    }

    async fn deliver(&self, event: GestureEvent) -> Result<()> {
        let Some(args) = self.resolve(&event) else {
            debug!("No action bound for {}", event);
            return Ok(());
        };

        let command_line = format!("{} {}", self.command, args.join(" "));
        let output = Command::new(&self.command)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| DispatchError::SpawnFailed {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DispatchError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Executed '{}' for {}", command_line, event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_bindings;

    #[test]
    fn test_resolve_bound_swipe() {
        let sink = KeyChordSink::new("xdotool", default_bindings(), Some("click 3"));

        let args = sink.resolve(&GestureEvent::new(100, 12, 3)).unwrap();
        assert_eq!(args, vec!["key".to_string(), "alt+shift+Tab".to_string()]);
    }

    #[test]
    fn test_resolve_long_press() {
        let sink = KeyChordSink::new("xdotool", Vec::new(), Some("click 3"));

        let args = sink.resolve(&GestureEvent::long_press()).unwrap();
        assert_eq!(args, vec!["click".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_resolve_unbound() {
        let sink = KeyChordSink::new("xdotool", default_bindings(), None);

        assert!(sink.resolve(&GestureEvent::new(100, 10, 5)).is_none());
        assert!(sink.resolve(&GestureEvent::long_press()).is_none());
    }

    #[test]
    fn test_blank_long_press_is_unbound() {
        let sink = KeyChordSink::new("xdotool", Vec::new(), Some("   "));
        assert!(sink.resolve(&GestureEvent::long_press()).is_none());
    }

    #[tokio::test]
    async fn test_deliver_runs_command() {
        let sink = KeyChordSink::new("true", Vec::new(), Some("click 3"));
        assert!(sink.deliver(GestureEvent::long_press()).await.is_ok());
    }

    #[tokio::test]
    async fn test_deliver_reports_failing_command() {
        let sink = KeyChordSink::new("false", Vec::new(), Some("click 3"));

        match sink.deliver(GestureEvent::long_press()).await {
            Err(DispatchError::CommandFailed { command, .. }) => {
                assert_eq!(command, "false click 3");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deliver_reports_missing_program() {
        let sink = KeyChordSink::new("/nonexistent/xdotool", Vec::new(), Some("click 3"));

        let result = sink.deliver(GestureEvent::long_press()).await;
        assert!(matches!(result, Err(DispatchError::SpawnFailed { .. })));
    }

    #[tokio::test]
    async fn test_unbound_event_is_not_executed() {
        // `false` would fail if it were run
        let sink = KeyChordSink::new("false", Vec::new(), None);
        assert!(sink.deliver(GestureEvent::new(101, 14, 2)).await.is_ok());
    }
}
