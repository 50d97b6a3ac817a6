//! Headless render model for the shipments map
//!
//! Produces the point layers a front-end draws: origin ports, destination
//! aggregates, live vessels and the hover halo, with colours and radii already
//! resolved. Destinations are drawn per port or per country. Only one marker
//! is hovered at a time; when several layers report a hover, the vessel wins
//! over the origin port, which wins over the destination aggregate.

use crate::shipment_tracking::domain::{
    ActiveVessel, CoordinateSource, CountryAggregate, FulfillmentState, OriginPortStats,
    PortAggregate, PortCounts,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// RGBA fill colour.
pub type Rgba = [u8; 4];

pub const DESTINATION_HOVER_FILL: Rgba = [0, 188, 212, 255];
pub const ARRIVED_FILL: Rgba = [76, 175, 80, 220];
pub const DEPARTED_FILL: Rgba = [255, 193, 7, 220];
pub const SCHEDULED_FILL: Rgba = [158, 158, 158, 220];
pub const ORIGIN_FILL: Rgba = [244, 67, 54, 240];
pub const ORIGIN_HOVER_FILL: Rgba = [255, 82, 82, 255];
pub const VESSEL_FILL: Rgba = [59, 130, 246, 255];
pub const HALO_FILL: Rgba = [0, 188, 212, 50];

const DESTINATION_BASE_RADIUS: f64 = 10_000.0;
const HOVER_SCALE: f64 = 1.5;
const ORIGIN_RADIUS: f64 = 9_000.0;
const ORIGIN_HOVER_RADIUS: f64 = 12_000.0;
const VESSEL_RADIUS: f64 = 9_000.0;
const HALO_RADIUS: f64 = 80_000.0;
const COUNTRY_HALO_RADIUS: f64 = 200_000.0;

/// How destination aggregates are grouped on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    #[default]
    Port,
    Country,
}

impl MapMode {
    fn halo_radius(self) -> f64 {
        match self {
            MapMode::Port => HALO_RADIUS,
            MapMode::Country => COUNTRY_HALO_RADIUS,
        }
    }
}

/// Destination aggregates for one [`MapMode`].
#[derive(Debug, Clone, Copy)]
pub enum DestinationLayer<'a> {
    Ports(&'a [PortAggregate]),
    Countries(&'a [CountryAggregate]),
}

impl DestinationLayer<'_> {
    pub fn mode(&self) -> MapMode {
        match self {
            DestinationLayer::Ports(_) => MapMode::Port,
            DestinationLayer::Countries(_) => MapMode::Country,
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            DestinationLayer::Ports(ports) => ports.iter().any(|p| p.port == name),
            DestinationLayer::Countries(countries) => countries.iter().any(|c| c.country == name),
        }
    }
}

/// Camera position when the map first opens (over the South Pacific coast).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

pub const INITIAL_VIEW: ViewState = ViewState {
    longitude: -70.0,
    latitude: -30.0,
    zoom: 1.5,
};

/// Fill colour of a destination marker.
pub fn destination_fill(state: FulfillmentState, hovered: bool) -> Rgba {
    if hovered {
        return DESTINATION_HOVER_FILL;
    }
    match state {
        FulfillmentState::Arrived => ARRIVED_FILL,
        FulfillmentState::Departed => DEPARTED_FILL,
        FulfillmentState::Scheduled => SCHEDULED_FILL,
    }
}

/// Radius in metres of a destination marker: logarithmic in the aggregate
/// total, with totals below one drawn as one.
pub fn destination_radius(total: usize, hovered: bool) -> f64 {
    let multiplier = (total.max(1) as f64).log10() + 1.0;
    let radius = DESTINATION_BASE_RADIUS * multiplier;
    if hovered {
        radius * HOVER_SCALE
    } else {
        radius
    }
}

/// What the pointer is over, per layer. Several can be set at once because
/// markers overlap; [`HoverState::active`] picks the one that gets the tooltip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    pub vessel: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layer", content = "name", rename_all = "snake_case")]
pub enum HoverTarget {
    Vessel(String),
    Origin(String),
    Destination(String),
}

impl HoverState {
    pub fn active(&self) -> Option<HoverTarget> {
        self.resolve(|_| true)
    }

    /// Highest-priority hovered target for which `exists` holds. A hover
    /// left over on a marker that has gone does not hide the layers below.
    pub fn resolve(&self, exists: impl Fn(&HoverTarget) -> bool) -> Option<HoverTarget> {
        let candidates = [
            self.vessel.clone().map(HoverTarget::Vessel),
            self.origin.clone().map(HoverTarget::Origin),
            self.destination.clone().map(HoverTarget::Destination),
        ];
        candidates.into_iter().flatten().find(|target| exists(target))
    }
}

/// A scatterplot layer with pixel clamping on the marker radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer<T> {
    pub id: &'static str,
    pub radius_min_pixels: u32,
    pub radius_max_pixels: u32,
    pub points: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginMarker {
    pub port: String,
    pub position: [f64; 2],
    pub radius: f64,
    pub fill: Rgba,
    pub hovered: bool,
    pub shipments: usize,
    pub depots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationMarker {
    /// Port name, or country name in country mode
    pub name: String,
    pub country: Option<String>,
    pub coordinate_source: CoordinateSource,
    pub position: [f64; 2],
    pub radius: f64,
    pub fill: Rgba,
    pub state: FulfillmentState,
    pub hovered: bool,
    pub counts: PortCounts,
    /// Per-port breakdown, country mode only
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, PortCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselMarker {
    pub vessel_name: String,
    pub position: [f64; 2],
    pub radius: f64,
    pub fill: Rgba,
    pub hovered: bool,
    /// Track polyline as `[lon, lat]` pairs, oldest first
    pub track: Vec<[f64; 2]>,
}

/// Translucent circle drawn under the hovered destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Halo {
    pub position: [f64; 2],
    pub radius: f64,
    pub fill: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tooltip {
    Vessel {
        vessel_name: String,
        destination: Option<String>,
        etd: Option<String>,
        eta: Option<String>,
        last_position_at: Option<String>,
        bookings: Vec<String>,
        containers: Vec<String>,
    },
    Origin {
        port: String,
        shipments: usize,
        depots: Vec<String>,
    },
    Destination {
        /// Marker name, or the part after `" - "` for `"REGION - PORT"` names
        title: String,
        subtitle: Option<String>,
        counts: PortCounts,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        ports: BTreeMap<String, PortCounts>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub mode: MapMode,
    pub initial_view: ViewState,
    pub origins: Layer<OriginMarker>,
    pub destinations: Layer<DestinationMarker>,
    pub vessels: Layer<VesselMarker>,
    pub halo: Option<Halo>,
    pub hovered: Option<HoverTarget>,
    pub tooltip: Option<Tooltip>,
}

impl MapView {
    /// Builds every layer from the current aggregates and vessels.
    ///
    /// Vessels without a known position are left off the vessel layer. A
    /// hover naming a marker that is not drawn is skipped in favour of the
    /// next layer's hover.
    pub fn build(
        destinations: DestinationLayer<'_>,
        origins: &[OriginPortStats],
        vessels: &[ActiveVessel],
        hover: &HoverState,
    ) -> Self {
        let mode = destinations.mode();
        let active = hover.resolve(|target| match target {
            HoverTarget::Vessel(name) => vessels
                .iter()
                .any(|v| v.vessel_name == *name && v.coordinates().is_some()),
            HoverTarget::Origin(name) => origins.iter().any(|o| o.port == *name),
            HoverTarget::Destination(name) => destinations.contains(name),
        });

        let origin_points: Vec<OriginMarker> = origins
            .iter()
            .map(|origin| {
                let hovered = matches!(&active, Some(HoverTarget::Origin(n)) if *n == origin.port);
                OriginMarker {
                    port: origin.port.clone(),
                    position: origin.coordinates.as_lon_lat(),
                    radius: if hovered {
                        ORIGIN_HOVER_RADIUS
                    } else {
                        ORIGIN_RADIUS
                    },
                    fill: if hovered { ORIGIN_HOVER_FILL } else { ORIGIN_FILL },
                    hovered,
                    shipments: origin.shipments,
                    depots: origin.depots.clone(),
                }
            })
            .collect();

        let destination_points: Vec<DestinationMarker> = match destinations {
            DestinationLayer::Ports(ports) => ports
                .iter()
                .map(|aggregate| {
                    let hovered = is_destination(&active, &aggregate.port);
                    let state = aggregate.fulfillment();
                    DestinationMarker {
                        name: aggregate.port.clone(),
                        country: aggregate.country.clone(),
                        coordinate_source: aggregate.coordinate_source,
                        position: aggregate.coordinates.as_lon_lat(),
                        radius: destination_radius(aggregate.counts.total, hovered),
                        fill: destination_fill(state, hovered),
                        state,
                        hovered,
                        counts: aggregate.counts,
                        ports: BTreeMap::new(),
                    }
                })
                .collect(),
            DestinationLayer::Countries(countries) => countries
                .iter()
                .map(|aggregate| {
                    let hovered = is_destination(&active, &aggregate.country);
                    let state = aggregate.fulfillment();
                    DestinationMarker {
                        name: aggregate.country.clone(),
                        country: Some(aggregate.country.clone()),
                        coordinate_source: CoordinateSource::Country,
                        position: aggregate.coordinates.as_lon_lat(),
                        radius: destination_radius(aggregate.counts.total, hovered),
                        fill: destination_fill(state, hovered),
                        state,
                        hovered,
                        counts: aggregate.counts,
                        ports: aggregate.ports.clone(),
                    }
                })
                .collect(),
        };

        let vessel_points: Vec<VesselMarker> = vessels
            .iter()
            .filter_map(|vessel| {
                let coordinates = vessel.coordinates()?;
                let hovered =
                    matches!(&active, Some(HoverTarget::Vessel(n)) if *n == vessel.vessel_name);
                Some(VesselMarker {
                    vessel_name: vessel.vessel_name.clone(),
                    position: coordinates.as_lon_lat(),
                    radius: VESSEL_RADIUS,
                    fill: VESSEL_FILL,
                    hovered,
                    track: vessel.track.iter().map(|p| [p.lon, p.lat]).collect(),
                })
            })
            .collect();

        let halo = destination_points.iter().find(|d| d.hovered).map(|d| Halo {
            position: d.position,
            radius: mode.halo_radius(),
            fill: HALO_FILL,
        });

        let tooltip = Self::tooltip(&active, &origin_points, &destination_points, vessels);

        MapView {
            mode,
            initial_view: INITIAL_VIEW,
            origins: Layer {
                id: "origin-ports",
                radius_min_pixels: 3,
                radius_max_pixels: 14,
                points: origin_points,
            },
            destinations: Layer {
                id: "destinations",
                radius_min_pixels: 4,
                radius_max_pixels: 28,
                points: destination_points,
            },
            vessels: Layer {
                id: "active-vessels",
                radius_min_pixels: 5,
                radius_max_pixels: 15,
                points: vessel_points,
            },
            halo,
            hovered: active,
            tooltip,
        }
    }

    fn tooltip(
        active: &Option<HoverTarget>,
        origins: &[OriginMarker],
        destinations: &[DestinationMarker],
        vessels: &[ActiveVessel],
    ) -> Option<Tooltip> {
        match active.as_ref()? {
            HoverTarget::Vessel(name) => {
                let vessel = vessels.iter().find(|v| v.vessel_name == *name)?;
                Some(Tooltip::Vessel {
                    vessel_name: vessel.vessel_name.clone(),
                    destination: vessel.destination.clone(),
                    etd: vessel.etd.clone(),
                    eta: vessel.eta.clone(),
                    last_position_at: vessel.last_position_at.clone(),
                    bookings: vessel.bookings.clone(),
                    containers: vessel.containers.clone(),
                })
            }
            HoverTarget::Origin(name) => {
                let origin = origins.iter().find(|o| o.port == *name)?;
                Some(Tooltip::Origin {
                    port: origin.port.clone(),
                    shipments: origin.shipments,
                    depots: origin.depots.clone(),
                })
            }
            HoverTarget::Destination(name) => {
                let destination = destinations.iter().find(|d| d.name == *name)?;
                let (title, subtitle) = match destination.name.split_once(" - ") {
                    Some((region, port)) => (port.to_string(), Some(region.to_string())),
                    None => (destination.name.clone(), None),
                };
                Some(Tooltip::Destination {
                    title,
                    subtitle,
                    counts: destination.counts,
                    ports: destination.ports.clone(),
                })
            }
        }
    }
}

fn is_destination(active: &Option<HoverTarget>, name: &str) -> bool {
    matches!(active, Some(HoverTarget::Destination(n)) if n == name)
}
