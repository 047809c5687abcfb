/// Subprocess adapters for external scanners
mod pipreqs;

pub use pipreqs::{PinMode, PipreqsTool};
