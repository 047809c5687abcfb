/// Consolidation domain - requirement entries, folder exclusion and merging
///
/// Pure logic with no filesystem or process access; the use case feeds it
/// data gathered through the outbound ports.
pub mod domain;
pub mod policies;
pub mod services;
