/// Domain types for shipment tracking
pub mod filter_selection;
pub mod geo;
pub mod port_aggregate;
pub mod raw_record;
pub mod shipment;
pub mod vessel;

pub use filter_selection::{DateField, FilterSelection};
pub use geo::{CoordinateSource, Coordinates};
pub use port_aggregate::{
    CountryAggregate, FulfillmentState, OriginPortStats, PortAggregate, PortCounts, SeasonBucket,
};
pub use raw_record::RawShipmentRecord;
pub use shipment::{ShipmentRecord, ShipmentStatus};
pub use vessel::{ActiveVessel, VesselPosition, VesselTrackPoint};
