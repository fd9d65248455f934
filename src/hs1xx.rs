mod codec;
mod plug;
mod sysinfo;

pub use codec::*;
pub use plug::*;
pub use sysinfo::*;
