use anyhow::Result;
use async_trait::async_trait;

use crate::control::RelayState;

#[async_trait]
pub trait SensorReader: Send + Sync {
    async fn read_temperature(&self) -> Result<i64>;
}

/// Why the actuator status could not be read.
///
/// The loop keeps going when the device is unreachable but stops when it
/// answers with something it cannot understand.
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    #[error("actuator unavailable: {0:#}")]
    Unavailable(anyhow::Error),

    #[error("malformed actuator response: {0:#}")]
    Malformed(anyhow::Error),
}

#[async_trait]
pub trait ActuatorController: Send + Sync {
    /// Seconds since the actuator was last switched on, zero when off.
    async fn on_duration(&self) -> Result<u64, ActuatorError>;

    async fn switch(&self, state: RelayState) -> Result<()>;
}

/// Last-write-wins gauges. Implementations must be safe to read while set.
pub trait MetricsSink: Send + Sync {
    fn set_temperature(&self, temperature: i64);

    fn set_relay_state(&self, state: RelayState);
}
