/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the walkdir traversal,
/// the pipreqs subprocess, file I/O, formatters and console output.
pub mod outbound;
