use anyhow::{Context as _, Result, anyhow};
use async_trait::async_trait;

use crate::{
    control::SensorReader,
    snmp::{Oid, SnmpClient, Value},
};

/// Reads the switch temperature from a single OID.
#[derive(Clone)]
pub struct SnmpTemperatureSensor {
    client: SnmpClient,
    oid: Oid,
}

impl SnmpTemperatureSensor {
    pub fn new(client: SnmpClient, oid: Oid) -> Self {
        Self { client, oid }
    }
}

#[async_trait]
impl SensorReader for SnmpTemperatureSensor {
    async fn read_temperature(&self) -> Result<i64> {
        let value = self
            .client
            .get(&self.oid)
            .await
            .with_context(|| format!("failed to get {} from {}", self.oid, self.client.host()))?;

        let temperature = to_temperature(&self.oid, &value)?;

        tracing::debug!(oid = %self.oid, temperature, "read temperature");

        Ok(temperature)
    }
}

fn to_temperature(oid: &Oid, value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| {
        anyhow!(
            "{oid} returned {}, expected an integer",
            value.type_name()
        )
    })
}
