/// Shipment tracking domain: records, coordinate lookups and the pure
/// normalize / filter / aggregate services built on top of them.
pub mod domain;
pub mod lookup;
pub mod services;
