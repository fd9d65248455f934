use anyhow::{Context as _, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus::{Encoder as _, IntGauge, Opts, Registry, TEXT_FORMAT, TextEncoder};

use crate::control::{MetricsSink, RelayState};

pub const TEMPERATURE_GAUGE: &str = "switch_temperature";
pub const RELAY_STATE_GAUGE: &str = "hs1xx_relay_state";

/// Gauges published for scraping, each holding the last value set.
///
/// Clones share the same registry and gauges.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    temperature: IntGauge,
    relay_state: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let temperature = IntGauge::with_opts(Opts::new(
            TEMPERATURE_GAUGE,
            "Current temperature of the switch",
        ))
        .context("failed to create temperature gauge")?;
        registry
            .register(Box::new(temperature.clone()))
            .context("failed to register temperature gauge")?;

        let relay_state =
            IntGauge::with_opts(Opts::new(RELAY_STATE_GAUGE, "Plug On or Off state"))
                .context("failed to create relay state gauge")?;
        registry
            .register(Box::new(relay_state.clone()))
            .context("failed to register relay state gauge")?;

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .context("failed to register process collector")?;

        Ok(Self {
            registry,
            temperature,
            relay_state,
        })
    }

    pub fn temperature(&self) -> i64 {
        self.temperature.get()
    }

    pub fn relay_state(&self) -> i64 {
        self.relay_state.get()
    }

    /// Renders every registered metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("failed to encode metrics")?;

        String::from_utf8(buffer).context("metrics are not valid UTF-8")
    }
}

impl MetricsSink for Metrics {
    fn set_temperature(&self, temperature: i64) {
        self.temperature.set(temperature);
    }

    fn set_relay_state(&self, state: RelayState) {
        self.relay_state.set(state.as_gauge());
    }
}

pub fn router(metrics: Metrics) -> Router {
    Router::new()
        .route("/metrics", get(scrape))
        .with_state(metrics)
}

async fn scrape(State(metrics): State<Metrics>) -> Response {
    match metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(err) => {
            tracing::error!("{err:#}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
