use std::fmt;

/// The two temperatures the fan is switched around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// At or above this the fan must run.
    pub too_hot: i64,

    /// At or below this the fan must stop.
    pub cool_enough: i64,
}

impl Thresholds {
    pub fn new(too_hot: i64, cool_enough: i64) -> Self {
        Self {
            too_hot,
            cool_enough,
        }
    }

    /// `too_hot < cool_enough` is accepted, but the upper check always wins.
    pub fn is_inverted(&self) -> bool {
        self.too_hot < self.cool_enough
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

impl RelayState {
    /// The plug reports how long it has been on; zero means off.
    pub fn from_on_duration(on_duration_secs: u64) -> Self {
        if on_duration_secs == 0 {
            RelayState::Off
        } else {
            RelayState::On
        }
    }

    pub fn as_gauge(&self) -> i64 {
        match self {
            RelayState::Off => 0,
            RelayState::On => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelayState::Off => "off",
            RelayState::On => "on",
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TooHot,
    CoolEnough,
    Comfortable,
}

impl Zone {
    pub fn classify(temperature: i64, thresholds: Thresholds) -> Self {
        if temperature >= thresholds.too_hot {
            Zone::TooHot
        } else if temperature <= thresholds.cool_enough {
            Zone::CoolEnough
        } else {
            Zone::Comfortable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub zone: Zone,

    pub observed: RelayState,

    /// What the relay should be after this cycle, and what gets published.
    pub target: RelayState,

    /// Set only when `target` differs from `observed`.
    pub command: Option<RelayState>,
}

pub fn decide(temperature: i64, thresholds: Thresholds, observed: RelayState) -> Decision {
    let zone = Zone::classify(temperature, thresholds);

    let target = match zone {
        Zone::TooHot => RelayState::On,
        Zone::CoolEnough => RelayState::Off,
        Zone::Comfortable => observed,
    };

    let command = (target != observed).then_some(target);

    Decision {
        zone,
        observed,
        target,
        command,
    }
}
