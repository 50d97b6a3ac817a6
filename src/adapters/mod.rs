/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// the shipment backend, local snapshot files, report formatters and the
/// console.
pub mod outbound;
