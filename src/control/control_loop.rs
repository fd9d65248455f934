use std::time::Duration;

use anyhow::{Context as _, Result};
use tokio::time::sleep;

use crate::control::{
    ActuatorController, ActuatorError, Decision, MetricsSink, RelayState, SensorReader,
    Thresholds, Zone, decide,
};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// On-duration assumed when the actuator status cannot be fetched.
///
/// Zero reads as "off", so a hot reading in that cycle re-sends the on
/// command even if the fan is already running.
pub const UNAVAILABLE_ON_DURATION: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub temperature: i64,

    pub on_duration: u64,

    pub decision: Decision,
}

pub struct ControlLoop<S, A, M> {
    sensor: S,
    actuator: A,
    metrics: M,
    thresholds: Thresholds,
    interval: Duration,
}

impl<S, A, M> ControlLoop<S, A, M>
where
    S: SensorReader,
    A: ActuatorController,
    M: MetricsSink,
{
    pub fn new(sensor: S, actuator: A, metrics: M, thresholds: Thresholds) -> Self {
        Self {
            sensor,
            actuator,
            metrics,
            thresholds,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Runs cycles until one fails fatally.
    pub async fn run(&self) -> Result<()> {
        tracing::info!(
            too_hot = self.thresholds.too_hot,
            cool_enough = self.thresholds.cool_enough,
            interval_secs = self.interval.as_secs(),
            "starting control loop"
        );

        loop {
            self.run_cycle().await?;
            sleep(self.interval).await;
        }
    }

    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let temperature = self
            .sensor
            .read_temperature()
            .await
            .context("failed to read temperature")?;

        self.metrics.set_temperature(temperature);

        let on_duration = match self.actuator.on_duration().await {
            Ok(d) => d,
            Err(err @ ActuatorError::Unavailable(_)) => {
                tracing::warn!(
                    fallback_on_duration = UNAVAILABLE_ON_DURATION,
                    "{err}"
                );
                UNAVAILABLE_ON_DURATION
            }
            Err(err @ ActuatorError::Malformed(_)) => {
                return Err(err).context("failed to read actuator status");
            }
        };

        let decision = decide(
            temperature,
            self.thresholds,
            RelayState::from_on_duration(on_duration),
        );

        log_decision(temperature, &decision);

        if let Some(state) = decision.command
            && let Err(err) = self.actuator.switch(state).await
        {
            tracing::warn!("failed to switch actuator {state}: {err:#}");
        }

        self.metrics.set_relay_state(decision.target);

        Ok(CycleReport {
            temperature,
            on_duration,
            decision,
        })
    }
}

fn log_decision(temperature: i64, decision: &Decision) {
    match (decision.zone, decision.command) {
        (Zone::TooHot, Some(_)) => {
            tracing::info!(temperature, "temperature too hot, starting cooling")
        }
        (Zone::TooHot, None) => {
            tracing::debug!(temperature, "temperature too hot but already cooling")
        }
        (Zone::CoolEnough, Some(_)) => {
            tracing::info!(temperature, "temperature cool enough, stopping cooling")
        }
        (Zone::CoolEnough, None) => {
            tracing::debug!(temperature, "temperature cool enough and not cooling")
        }
        (Zone::Comfortable, _) => {
            tracing::debug!(
                temperature,
                relay = %decision.observed,
                "temperature between thresholds, holding"
            )
        }
    }
}
