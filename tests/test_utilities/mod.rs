// Each test binary uses a different subset of these helpers
#![allow(dead_code, unused_imports)]

#[cfg(unix)]
pub mod fake_pipreqs;
pub mod mocks;
