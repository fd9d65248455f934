pub mod control;
pub mod hs1xx;
pub mod metrics;
pub mod snmp;
