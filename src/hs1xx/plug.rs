use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use async_trait::async_trait;
use serde_json::json;
use tokio::{io::AsyncWriteExt as _, net::TcpStream, time::timeout};

use crate::{
    control::{ActuatorController, ActuatorError, RelayState},
    hs1xx::{SetRelayStateResponse, Sysinfo, frame, read_frame},
};

pub const DEFAULT_PORT: u16 = 9999;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A TP-Link HS100/HS110 smart plug. Each request uses its own connection.
#[derive(Debug, Clone)]
pub struct Hs1xxPlug {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Hs1xxPlug {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends one command and returns the decrypted reply.
    pub async fn request(&self, command: &serde_json::Value) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(command).context("failed to encode plug command")?;

        timeout(self.timeout, async {
            let mut stream = TcpStream::connect((self.host.as_str(), self.port))
                .await
                .with_context(|| format!("failed to connect to {}:{}", self.host, self.port))?;

            stream
                .write_all(&frame(&payload))
                .await
                .context("failed to send plug command")?;

            read_frame(&mut stream)
                .await
                .context("failed to read plug reply")
        })
        .await
        .map_err(|_| anyhow!("plug did not answer within {:?}", self.timeout))?
    }

    async fn fetch_sysinfo(&self) -> Result<Vec<u8>> {
        self.request(&json!({ "system": { "get_sysinfo": {} } }))
            .await
    }

    pub async fn set_relay_state(&self, state: RelayState) -> Result<()> {
        let reply = self
            .request(&json!({ "system": { "set_relay_state": { "state": state.as_gauge() } } }))
            .await?;
        SetRelayStateResponse::parse(&reply)
    }

    pub async fn turn_on(&self) -> Result<()> {
        self.set_relay_state(RelayState::On).await
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.set_relay_state(RelayState::Off).await
    }
}

#[async_trait]
impl ActuatorController for Hs1xxPlug {
    async fn on_duration(&self) -> Result<u64, ActuatorError> {
        let reply = self
            .fetch_sysinfo()
            .await
            .with_context(|| format!("failed to query plug {}", self.host))
            .map_err(ActuatorError::Unavailable)?;

        let info = Sysinfo::decode(&reply).map_err(ActuatorError::Malformed)?;
        info.ensure_ok().map_err(ActuatorError::Unavailable)?;

        let mac = info
            .mac_address()
            .map(|mac| mac.to_string())
            .unwrap_or_else(|_| info.mac.clone());
        tracing::debug!(
            alias = %info.alias,
            %mac,
            on_time = info.on_time,
            relay_state = info.relay_state,
            "read plug status"
        );

        Ok(info.on_time)
    }

    async fn switch(&self, state: RelayState) -> Result<()> {
        let result = match state {
            RelayState::On => self.turn_on().await,
            RelayState::Off => self.turn_off().await,
        };
        result.with_context(|| format!("failed to switch plug {} {state}", self.host))?;

        tracing::info!(plug = %self.host, "switched plug {state}");

        Ok(())
    }
}
