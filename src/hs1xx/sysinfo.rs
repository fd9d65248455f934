use anyhow::{Context as _, Result, bail};
use macaddr::MacAddr6;
use serde::Deserialize;

/// Reply to `{"system":{"get_sysinfo":{}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SysinfoResponse {
    pub system: SysinfoSystem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysinfoSystem {
    pub get_sysinfo: Sysinfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sysinfo {
    #[serde(default)]
    pub err_code: i64,

    #[serde(default)]
    pub sw_ver: String,

    #[serde(default)]
    pub hw_ver: String,

    #[serde(default, rename = "type")]
    pub device_type: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub mac: String,

    #[serde(default, rename = "deviceId")]
    pub device_id: String,

    #[serde(default)]
    pub alias: String,

    #[serde(default)]
    pub relay_state: u8,

    /// Seconds since the relay was switched on; zero while off.
    pub on_time: u64,

    #[serde(default)]
    pub rssi: i64,

    #[serde(default)]
    pub led_off: u8,
}

impl Sysinfo {
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let response: SysinfoResponse =
            serde_json::from_slice(payload).context("failed to decode sysinfo response")?;
        Ok(response.system.get_sysinfo)
    }

    pub fn ensure_ok(&self) -> Result<()> {
        if self.err_code != 0 {
            bail!("plug reported err_code {} for get_sysinfo", self.err_code);
        }
        Ok(())
    }

    pub fn mac_address(&self) -> Result<MacAddr6> {
        self.mac
            .parse()
            .with_context(|| format!("invalid MAC address: {}", self.mac))
    }
}

/// Reply to `{"system":{"set_relay_state":{"state":N}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRelayStateResponse {
    pub system: SetRelayStateSystem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetRelayStateSystem {
    pub set_relay_state: ErrCode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrCode {
    pub err_code: i64,

    #[serde(default)]
    pub err_msg: Option<String>,
}

impl SetRelayStateResponse {
    pub fn parse(payload: &[u8]) -> Result<()> {
        let response: SetRelayStateResponse =
            serde_json::from_slice(payload).context("failed to decode set_relay_state response")?;
        let status = response.system.set_relay_state;
        if status.err_code != 0 {
            bail!(
                "plug reported err_code {} for set_relay_state: {}",
                status.err_code,
                status.err_msg.as_deref().unwrap_or("no message")
            );
        }
        Ok(())
    }
}
