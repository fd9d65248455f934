use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use switch_cooler::{control::Thresholds, snmp::Oid};

/// Keeps a switch cool by driving a fan plugged into an HS1xx smart plug.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Switch polled for its temperature over SNMPv3.
    #[arg(long, env = "SWITCH_IP")]
    pub switch_ip: String,

    #[arg(long, env = "SNMP_PORT", default_value_t = 161)]
    pub snmp_port: u16,

    #[arg(long, env = "SNMP_USERNAME")]
    pub snmp_username: String,

    /// Used for both authentication (SHA) and privacy (AES).
    #[arg(long, env = "SNMP_PASSWORD", hide_env_values = true)]
    pub snmp_password: String,

    #[arg(long, env = "TEMPERATURE_OID")]
    pub temperature_oid: Oid,

    /// Seconds to wait for each SNMP response.
    #[arg(long, env = "SNMP_TIMEOUT", default_value_t = 30)]
    pub snmp_timeout: u64,

    /// Smart plug the fan is connected to.
    #[arg(long, env = "HS1XX_SOCKET_IP")]
    pub hs1xx_socket_ip: String,

    #[arg(long, env = "HS1XX_SOCKET_PORT", default_value_t = 9999)]
    pub hs1xx_socket_port: u16,

    /// Seconds to wait for each plug request.
    #[arg(long, env = "HS1XX_TIMEOUT", default_value_t = 10)]
    pub hs1xx_timeout: u64,

    /// Temperature at or above which the fan is turned on.
    #[arg(long, env = "MAXIMUM_OFF_TEMPERATURE", allow_negative_numbers = true)]
    pub maximum_off_temperature: i64,

    /// Temperature at or below which the fan is turned off.
    #[arg(long, env = "MINIMAL_ON_TEMPERATURE", allow_negative_numbers = true)]
    pub minimal_on_temperature: i64,

    /// Seconds between control cycles.
    #[arg(
        long,
        env = "CHECK_INTERVAL",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub check_interval: u64,

    #[arg(long, env = "LISTEN_ADDRESS", default_value = "0.0.0.0:9116")]
    pub listen_address: SocketAddr,
}

impl Args {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.maximum_off_temperature, self.minimal_on_temperature)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }

    pub fn snmp_timeout(&self) -> Duration {
        Duration::from_secs(self.snmp_timeout)
    }

    pub fn hs1xx_timeout(&self) -> Duration {
        Duration::from_secs(self.hs1xx_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[&str] = &[
        "switch-cooler",
        "--switch-ip",
        "192.0.2.10",
        "--snmp-username",
        "monitor",
        "--snmp-password",
        "secret-passphrase",
        "--temperature-oid",
        "1.3.6.1.4.1.4413.1.1.43.1.8.1.5.1.1",
        "--hs1xx-socket-ip",
        "192.0.2.20",
        "--maximum-off-temperature",
        "55",
        "--minimal-on-temperature",
        "45",
    ];

    #[test]
    fn defaults_match_the_exporter() {
        let args = Args::try_parse_from(REQUIRED).unwrap();
        assert_eq!(args.snmp_port, 161);
        assert_eq!(args.snmp_timeout(), Duration::from_secs(30));
        assert_eq!(args.hs1xx_socket_port, 9999);
        assert_eq!(args.check_interval(), Duration::from_secs(60));
        assert_eq!(args.listen_address.port(), 9116);
        assert_eq!(args.thresholds(), Thresholds::new(55, 45));
    }

    #[test]
    fn thresholds_must_be_integers() {
        let mut argv = REQUIRED.to_vec();
        let i = argv.iter().position(|a| *a == "55").unwrap();
        argv[i] = "55.5";
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn negative_thresholds_are_accepted() {
        let mut argv = REQUIRED.to_vec();
        let i = argv.iter().position(|a| *a == "45").unwrap();
        argv[i] = "-5";
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.minimal_on_temperature, -5);
    }

    #[test]
    fn malformed_oid_is_rejected() {
        let mut argv = REQUIRED.to_vec();
        let i = argv.iter().position(|a| a.starts_with("1.3.6")).unwrap();
        argv[i] = "not.an.oid";
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--check-interval", "0"]);
        assert!(Args::try_parse_from(argv).is_err());
    }
}
