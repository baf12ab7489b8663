mod core;
mod session;

pub use core::{ZoneEngine, visits_in};
pub use session::SessionReport;
