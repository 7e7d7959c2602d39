//! D-Bus Gesture Service
//!
//! Publishes encoded gesture events as the `Event(i name, i direction,
//! i fingers)` signal of `com.deepin.daemon.Gesture`. Native gestures and
//! touch classifications share the same signal, so subscribers need a single
//! match rule:
//!
//! ```text
//! type='signal',interface='com.deepin.daemon.Gesture',member='Event'
//! ```
//!
//! Registration happens once at startup. Failing to own the bus name or to
//! export the object is fatal: classified outcomes would have no destination.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use zbus::{connection, interface, Connection, SignalContext};

use crate::actions::{self, ActionSink};
use crate::config::types::{BusConfig, BusType};
use crate::protocol::GestureEvent;

/// D-Bus interface name
pub const INTERFACE_NAME: &str = "com.deepin.daemon.Gesture";

/// Exported gesture object
#[derive(Debug, Default)]
pub struct GestureInterface;

#[interface(name = "com.deepin.daemon.Gesture")]
impl GestureInterface {
    /// Gesture name, gesture action or direction, fingers
    #[zbus(signal)]
    async fn event(
        ctxt: &SignalContext<'_>,
        name: i32,
        direction: i32,
        fingers: i32,
    ) -> zbus::Result<()>;
}

/// Action sink emitting the `Event` signal
pub struct DbusSignalSink {
    connection: Connection,
    object_path: String,
}

impl DbusSignalSink {
    /// Connect to the configured bus, own the service name and export the object
    pub async fn connect(config: &BusConfig) -> Result<Self> {
        info!(
            "Registering {} at {} on the {} bus",
            config.service_name, config.object_path, config.connection
        );

        let builder = match config.connection {
            BusType::Session => connection::Builder::session(),
            BusType::System => connection::Builder::system(),
        }
        .with_context(|| format!("Failed to connect to the {} D-Bus", config.connection))?;

        let connection = builder
            .name(config.service_name.as_str())
            .context("Invalid D-Bus service name")?
            .serve_at(config.object_path.as_str(), GestureInterface)
            .context("Invalid D-Bus object path")?
            .build()
            .await
            .with_context(|| {
                format!(
                    "Failed to register {} on the {} D-Bus",
                    config.service_name, config.connection
                )
            })?;

        debug!(
            "D-Bus connection established (unique name: {:?})",
            connection.unique_name()
        );

        Ok(Self {
            connection,
            object_path: config.object_path.clone(),
        })
    }
}

#[async_trait]
impl ActionSink for DbusSignalSink {
    fn name(&self) -> &'static str {
        "dbus-signal"
    }

    async fn deliver(&self, event: GestureEvent) -> actions::Result<()> {
        let ctxt = SignalContext::new(&self.connection, self.object_path.as_str())?;
        GestureInterface::event(&ctxt, event.name, event.direction, event.fingers).await?;
        debug!("Emitted {}.Event{}", INTERFACE_NAME, event);
        Ok(())
    }
}
