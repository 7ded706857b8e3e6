//! MQTT session wrapper.
//!
//! [`ThinCloudClient`] composes a topic build, an envelope encode, and a
//! publish or subscribe into single calls mirroring the cloud-side
//! interaction patterns. Publishes go out QoS 0 and non-retained per the
//! upstream service contract; everything past handing (topic, payload) to
//! `rumqttc` — delivery, session state, reconnect backoff — is the
//! transport's concern.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{
    AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS, TlsConfiguration, Transport,
};
use serde_json::Value;
use tracing::{error, info, warn};

use thincloud_core::envelope::{self, ResponseStatus};
use thincloud_core::error::{Result, ThinCloudError};
use thincloud_core::topic::{self, MAX_TOPIC_LENGTH};

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;

/// Upper bound for an encoded envelope accepted by the publish helpers.
/// Oversized bodies surface as a buffer-capacity error from the codec.
pub const MAX_ENVELOPE_LENGTH: usize = 4096;

/// Handle for outbound actions. Cheap to clone; all clones share one
/// session.
#[derive(Clone)]
pub struct ThinCloudClient {
    client: AsyncClient,
    op_timeout: Duration,
}

/// Owns the connection event loop. Run it for the lifetime of the session.
pub struct SessionDriver {
    eventloop: EventLoop,
    auto_reconnect: bool,
}

/// Open an MQTT session against a ThinCloud host.
///
/// Reads the CA and client credential PEM files referenced by the config
/// and prepares a clean mutual-TLS session. The connection itself is
/// established lazily by the returned driver's event loop.
pub fn connect(cfg: &ClientConfig) -> Result<(ThinCloudClient, SessionDriver)> {
    let ca = read_pem(&cfg.root_ca_path)?;
    let client_cert = read_pem(&cfg.client_cert_path)?;
    let private_key = read_pem(&cfg.private_key_path)?;

    let mut options = MqttOptions::new(&cfg.client_id, &cfg.host, cfg.port);
    options.set_keep_alive(Duration::from_secs(cfg.keep_alive_secs));
    options.set_clean_session(true);
    options.set_transport(Transport::Tls(TlsConfiguration::Simple {
        ca,
        alpn: None,
        client_auth: Some((client_cert, private_key)),
    }));

    let (client, eventloop) = AsyncClient::new(options, 100);
    info!(host = %cfg.host, port = cfg.port, client_id = %cfg.client_id, "thincloud session prepared");

    Ok((
        ThinCloudClient {
            client,
            op_timeout: Duration::from_millis(cfg.operation_timeout_ms),
        },
        SessionDriver {
            eventloop,
            auto_reconnect: cfg.auto_reconnect,
        },
    ))
}

fn read_pem(path: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ThinCloudError::Config(format!("read credential {path}: {e}")))
}

fn topic_str(buf: &[u8]) -> Result<&str> {
    std::str::from_utf8(buf).map_err(|e| ThinCloudError::Parse(format!("topic not utf-8: {e}")))
}

impl ThinCloudClient {
    /// Publish a commissioning request for a device awaiting an identity.
    pub async fn send_commissioning_request(
        &self,
        request_id: Option<&str>,
        device_type: &str,
        physical_id: &str,
    ) -> Result<()> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let topic_len = topic::commission_request_topic(&mut topic_buf, device_type, physical_id)?;

        let mut payload = vec![0u8; MAX_ENVELOPE_LENGTH];
        let len = envelope::commissioning_request(&mut payload, request_id, device_type, physical_id)?;
        payload.truncate(len);

        self.publish(topic_str(&topic_buf[..topic_len])?, payload).await
    }

    /// Publish a command response. The command id doubles as the envelope
    /// id so the cloud correlates the response with its request.
    pub async fn send_command_response(
        &self,
        device_id: &str,
        command_id: &str,
        status: ResponseStatus,
    ) -> Result<()> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let topic_len = topic::command_response_topic(&mut topic_buf, device_id, command_id)?;

        let mut payload = vec![0u8; MAX_ENVELOPE_LENGTH];
        let len = envelope::command_response(&mut payload, Some(command_id), status)?;
        payload.truncate(len);

        self.publish(topic_str(&topic_buf[..topic_len])?, payload).await
    }

    /// Publish a service request to a cloud-side service.
    pub async fn send_service_request(
        &self,
        request_id: Option<&str>,
        device_id: &str,
        method: &str,
        params: Option<Value>,
    ) -> Result<()> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let topic_len = topic::service_request_topic(&mut topic_buf, device_id)?;

        let mut payload = vec![0u8; MAX_ENVELOPE_LENGTH];
        let len = envelope::service_request(&mut payload, request_id, method, params)?;
        payload.truncate(len);

        self.publish(topic_str(&topic_buf[..topic_len])?, payload).await
    }

    /// Subscribe to the response topic for an in-flight commissioning
    /// request. Returns the subscribed topic so the caller can register a
    /// handler for it.
    pub async fn subscribe_to_commissioning_response(
        &self,
        request_id: &str,
        device_type: &str,
        physical_id: &str,
    ) -> Result<String> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let len =
            topic::commission_response_topic(&mut topic_buf, device_type, physical_id, request_id)?;
        self.subscribe(topic_str(&topic_buf[..len])?).await
    }

    /// Subscribe to command requests addressed to a device. Returns the
    /// subscribed topic.
    pub async fn subscribe_to_command_request(&self, device_id: &str) -> Result<String> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let len = topic::command_request_topic(&mut topic_buf, device_id)?;
        self.subscribe(topic_str(&topic_buf[..len])?).await
    }

    /// Subscribe to the response topic for an in-flight service request.
    /// Returns the subscribed topic.
    pub async fn subscribe_to_service_response(
        &self,
        device_id: &str,
        request_id: &str,
    ) -> Result<String> {
        let mut topic_buf = [0u8; MAX_TOPIC_LENGTH];
        let len = topic::service_response_topic(&mut topic_buf, device_id, request_id)?;
        self.subscribe(topic_str(&topic_buf[..len])?).await
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        let send = self.client.publish(topic, QoS::AtMostOnce, false, payload);
        tokio::time::timeout(self.op_timeout, send)
            .await
            .map_err(|_| ThinCloudError::Transport(format!("publish {topic}: timed out")))?
            .map_err(|e| ThinCloudError::Transport(format!("publish {topic}: {e}")))
    }

    async fn subscribe(&self, topic: &str) -> Result<String> {
        let send = self.client.subscribe(topic, QoS::AtMostOnce);
        tokio::time::timeout(self.op_timeout, send)
            .await
            .map_err(|_| ThinCloudError::Transport(format!("subscribe {topic}: timed out")))?
            .map_err(|e| ThinCloudError::Transport(format!("subscribe {topic}: {e}")))?;
        Ok(topic.to_owned())
    }
}

impl SessionDriver {
    /// Drive the MQTT event loop, routing inbound publishes through the
    /// dispatcher. Handler errors are logged and the session continues.
    /// Returns when the connection fails and auto-reconnect is off.
    pub async fn run(mut self, dispatcher: Arc<Dispatcher>) {
        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                    info!("connected to thincloud broker");
                }
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    if let Err(e) = dispatcher.dispatch(&publish.topic, publish.payload).await {
                        warn!(topic = %publish.topic, error = %e, "inbound handler failed");
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    if !self.auto_reconnect {
                        error!(error = %e, "connection lost");
                        return;
                    }
                    warn!(error = %e, "connection error, retrying");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }
}
