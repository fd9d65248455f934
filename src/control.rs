mod collaborators;
mod control_loop;
mod decision;

pub use collaborators::*;
pub use control_loop::*;
pub use decision::*;
