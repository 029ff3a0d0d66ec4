// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Message-queue publishing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};

use crate::error::{Error, ProtocolError};
use crate::identity::DeviceId;

/// Environment variable naming the broker address (`host[:port]`).
pub const BROKER_ENV: &str = "LUMEN_BROKER";

/// Broker address used when no configuration or environment override is
/// present.
const DEFAULT_BROKER: &str = "127.0.0.1:1883";

/// Default MQTT port when the address omits one.
const DEFAULT_PORT: u16 = 1883;

/// Global counter for generating unique client IDs.
static CLIENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Configuration for a [`Publisher`].
///
/// Both fields may be left absent: the device ID falls back to
/// [`DeviceId::detect`] and the broker address to the `LUMEN_BROKER`
/// environment variable, then to `127.0.0.1:1883`.
#[derive(Debug, Clone, Default)]
pub struct PublisherConfig {
    /// The device ID to stamp on topics, if already known.
    pub device_id: Option<DeviceId>,
    /// The broker address (`host[:port]`, `mqtt://` prefix accepted).
    pub broker: Option<String>,
}

impl PublisherConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit device ID.
    #[must_use]
    pub fn with_device_id(mut self, id: DeviceId) -> Self {
        self.device_id = Some(id);
        self
    }

    /// Sets an explicit broker address.
    #[must_use]
    pub fn with_broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }
}

/// A long-lived queue message publishing object.
///
/// Topic names are automatically prefixed with the device ID, e.g. a
/// send on `command` from device `abc123` lands on `abc123/command`, so
/// consumers can subscribe per device.
///
/// # Examples
///
/// ```no_run
/// use lumen_lib::agent::{Publisher, PublisherConfig};
/// use lumen_lib::identity::DeviceId;
///
/// # async fn example() -> lumen_lib::Result<()> {
/// let publisher = Publisher::connect(
///     PublisherConfig::new().with_device_id(DeviceId::from("abc123")),
/// )?;
/// publisher.send("command", "!#F00").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Publisher {
    id: DeviceId,
    client: AsyncClient,
}

impl Publisher {
    /// Creates a new queue publisher.
    ///
    /// Must be called within a tokio runtime; the connection's event
    /// loop is driven by a spawned task for the life of the publisher.
    ///
    /// # Errors
    ///
    /// Returns an error if no device ID is configured and none can be
    /// detected, or if the broker address is malformed.
    pub fn connect(config: PublisherConfig) -> Result<Self, Error> {
        let id = match config.device_id {
            Some(id) => id,
            // Automatically assign an ID if none was provided
            None => DeviceId::detect()?,
        };

        let broker = config
            .broker
            .or_else(|| std::env::var(BROKER_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BROKER.to_string());
        let (host, port) = parse_broker_addr(&broker)?;

        let counter = CLIENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let client_id = format!("lumen_{}_{}", std::process::id(), counter);
        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, event_loop) = AsyncClient::new(options, 10);
        tokio::spawn(drive_event_loop(event_loop));

        Ok(Self { id, client })
    }

    /// Returns the publisher's device ID.
    #[must_use]
    pub const fn device_id(&self) -> &DeviceId {
        &self.id
    }

    /// Posts a message to the queue on the given topic.
    ///
    /// The topic name is automatically prepended with the device ID
    /// followed by a `/`, e.g. `abc123/command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be queued for delivery.
    pub async fn send(&self, topic: &str, message: &str) -> Result<(), ProtocolError> {
        let topic = format!("{}/{topic}", self.id);
        tracing::debug!(%topic, %message, "publishing message");
        self.client
            .publish(topic, QoS::AtLeastOnce, false, message)
            .await
            .map_err(ProtocolError::Mqtt)
    }
}

// Keeps the connection alive; rumqttc requires the event loop to be
// polled for published messages to make progress.
async fn drive_event_loop(mut event_loop: EventLoop) {
    loop {
        match event_loop.poll().await {
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "broker connection error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

/// Parses a broker address into host and port.
fn parse_broker_addr(addr: &str) -> Result<(String, u16), ProtocolError> {
    let addr = addr.strip_prefix("mqtt://").unwrap_or(addr);
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| ProtocolError::InvalidAddress(addr.to_string()))?;
            Ok((host.to_string(), port))
        }
        None => Ok((addr.to_string(), DEFAULT_PORT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_broker_addr_with_port() {
        assert_eq!(
            parse_broker_addr("192.168.0.64:1884").unwrap(),
            ("192.168.0.64".to_string(), 1884)
        );
    }

    #[test]
    fn parse_broker_addr_defaults_port() {
        assert_eq!(
            parse_broker_addr("broker.local").unwrap(),
            ("broker.local".to_string(), 1883)
        );
    }

    #[test]
    fn parse_broker_addr_accepts_scheme_prefix() {
        assert_eq!(
            parse_broker_addr("mqtt://broker.local:1883").unwrap(),
            ("broker.local".to_string(), 1883)
        );
    }

    #[test]
    fn parse_broker_addr_rejects_bad_port() {
        assert!(parse_broker_addr("broker.local:lots").is_err());
    }

    #[tokio::test]
    async fn publisher_prefixes_topics_with_device_id() {
        let publisher = Publisher::connect(
            PublisherConfig::new()
                .with_device_id(DeviceId::from("abc123"))
                .with_broker("127.0.0.1:1"),
        )
        .unwrap();
        assert_eq!(publisher.device_id().as_str(), "abc123");
    }
}
