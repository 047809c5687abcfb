/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports are the seams between the consolidation use case and the
/// filesystem, the pipreqs process and the console.
pub mod outbound;
