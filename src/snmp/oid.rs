use std::{fmt, str::FromStr};

use anyhow::{Context as _, Error, Result, anyhow, bail};

/// An object identifier such as `1.3.6.1.4.1.4413.1.1.43.1.8.1.5.1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(Vec<u64>);

impl Oid {
    pub fn new(arcs: Vec<u64>) -> Result<Self> {
        if arcs.len() < 2 {
            bail!("OID needs at least two arcs, got {}", arcs.len());
        }
        if arcs[0] > 2 {
            bail!("OID first arc must be 0, 1 or 2, got {}", arcs[0]);
        }
        if arcs[0] < 2 && arcs[1] >= 40 {
            bail!(
                "OID second arc must be below 40 under arc {}, got {}",
                arcs[0],
                arcs[1]
            );
        }

        Ok(Self(arcs))
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    pub fn to_snmp(&self) -> Result<snmp2::Oid<'static>> {
        snmp2::Oid::from(&self.0).map_err(|err| anyhow!("cannot encode OID {self}: {err:?}"))
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            bail!("empty OID");
        }

        let arcs = trimmed
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .with_context(|| format!("invalid OID arc {arc:?} in {s:?}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Oid::new(arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}
