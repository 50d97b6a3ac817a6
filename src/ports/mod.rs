/// Ports module defining interfaces for hexagonal architecture
///
/// The application core depends only on these outbound (driven) ports; the
/// CLI drives the use cases directly.
pub mod outbound;
