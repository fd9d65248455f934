mod client;
mod oid;
mod sensor;
mod value;

pub use client::*;
pub use oid::*;
pub use sensor::*;
pub use value::*;
