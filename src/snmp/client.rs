use std::time::Duration;

use anyhow::{Context as _, Result, anyhow, bail};
use snmp2::{SyncSession, v3};

use crate::snmp::{Oid, Value};

pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// SNMPv3 GET client using authPriv with SHA-1 and AES-128.
///
/// Every request opens its own session: engine discovery, then the
/// authenticated and encrypted GET.
#[derive(Clone)]
pub struct SnmpClient {
    host: String,
    port: u16,
    timeout: Duration,
    user_name: Vec<u8>,
    passphrase: Vec<u8>,
}

impl SnmpClient {
    /// The passphrase is used for both authentication and privacy.
    pub fn new(host: impl Into<String>, user_name: &str, passphrase: &str) -> Result<Self> {
        if passphrase.is_empty() {
            bail!("SNMP passphrase is empty");
        }

        Ok(Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            user_name: user_name.as_bytes().to_vec(),
            passphrase: passphrase.as_bytes().to_vec(),
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn get(&self, oid: &Oid) -> Result<Value> {
        let client = self.clone();
        let oid = oid.clone();

        tokio::task::spawn_blocking(move || client.get_blocking(&oid))
            .await
            .context("SNMP request task panicked")?
    }

    fn security(&self) -> v3::Security {
        v3::Security::new(&self.user_name, &self.passphrase)
            .with_auth_protocol(v3::AuthProtocol::Sha1)
            .with_auth(v3::Auth::AuthPriv {
                cipher: v3::Cipher::Aes128,
                privacy_password: self.passphrase.clone(),
            })
    }

    fn get_blocking(&self, oid: &Oid) -> Result<Value> {
        let target = oid.to_snmp()?;

        let mut session = SyncSession::new_v3(
            (self.host.as_str(), self.port),
            Some(self.timeout),
            0,
            self.security(),
        )
        .map_err(|err| anyhow!("failed to open SNMP session to {}: {err:?}", self.host))?;

        session
            .init()
            .map_err(|err| anyhow!("SNMP engine discovery failed: {err:?}"))?;

        let mut resynced = false;
        loop {
            match session.get(&target) {
                Ok(mut pdu) => {
                    let value = pdu.varbinds.next().map(|(_, value)| Value::from(&value));
                    return check_response(
                        oid,
                        i64::from(pdu.error_status),
                        i64::from(pdu.error_index),
                        value,
                    );
                }
                // The session has picked up the agent's new boots and time.
                Err(snmp2::Error::AuthUpdated) if !resynced => {
                    tracing::debug!("SNMP agent clock moved, resending");
                    resynced = true;
                }
                Err(err) => bail!("SNMP GET {oid} failed: {err:?}"),
            }
        }
    }
}

fn error_status_name(status: i64) -> &'static str {
    match status {
        1 => "tooBig",
        2 => "noSuchName",
        3 => "badValue",
        4 => "readOnly",
        5 => "genErr",
        6 => "noAccess",
        16 => "authorizationError",
        _ => "error",
    }
}

fn check_response(
    oid: &Oid,
    error_status: i64,
    error_index: i64,
    value: Option<Value>,
) -> Result<Value> {
    if error_status != 0 {
        bail!(
            "SNMP agent returned {} ({error_status}) at index {error_index}",
            error_status_name(error_status)
        );
    }

    let value = value.ok_or_else(|| anyhow!("SNMP response has no value for {oid}"))?;
    if value.is_exception() {
        bail!("{oid}: {}", value.type_name());
    }

    Ok(value)
}
