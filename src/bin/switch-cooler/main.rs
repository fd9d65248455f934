mod args;

use std::{future::IntoFuture as _, process::ExitCode};

use anyhow::{Context as _, Result, bail};
use args::Args;
use clap::Parser as _;
use switch_cooler::{
    control::ControlLoop,
    hs1xx::Hs1xxPlug,
    metrics::{self, Metrics},
    snmp::{SnmpClient, SnmpTemperatureSensor},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "switch_cooler=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let thresholds = args.thresholds();
    if thresholds.is_inverted() {
        tracing::warn!(
            maximum_off_temperature = thresholds.too_hot,
            minimal_on_temperature = thresholds.cool_enough,
            "MAXIMUM_OFF_TEMPERATURE is below MINIMAL_ON_TEMPERATURE; the on check wins where they overlap"
        );
    }

    let metrics = Metrics::new().context("failed to initialize metrics")?;

    let snmp = SnmpClient::new(
        args.switch_ip.as_str(),
        &args.snmp_username,
        &args.snmp_password,
    )
    .context("failed to configure SNMP client")?
    .with_port(args.snmp_port)
    .with_timeout(args.snmp_timeout());
    let sensor = SnmpTemperatureSensor::new(snmp, args.temperature_oid.clone());

    let plug = Hs1xxPlug::new(args.hs1xx_socket_ip.as_str())
        .with_port(args.hs1xx_socket_port)
        .with_timeout(args.hs1xx_timeout());

    let control = ControlLoop::new(sensor, plug, metrics.clone(), thresholds)
        .with_interval(args.check_interval());

    let listener = TcpListener::bind(args.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_address))?;
    tracing::info!("serving metrics on http://{}/metrics", args.listen_address);

    let server = axum::serve(listener, metrics::router(metrics)).into_future();

    tokio::select! {
        result = control.run() => result.context("control loop stopped"),
        result = server => {
            result.context("metrics server failed")?;
            bail!("metrics server stopped")
        }
    }
}
