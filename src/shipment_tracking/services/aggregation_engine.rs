use crate::shipment_tracking::domain::{
    CountryAggregate, OriginPortStats, PortAggregate, PortCounts, SeasonBucket, ShipmentRecord,
};
use crate::shipment_tracking::lookup::{
    locate_destination, CountryDirectory, PortDirectory, ResolvedLocation,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Destination port that could not be placed on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlocatedPort {
    pub port: String,
    pub records: usize,
}

/// Output of [`AggregationEngine::aggregate_destinations`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DestinationAggregation {
    /// One entry per located destination, sorted by port name
    pub destinations: Vec<PortAggregate>,
    /// Ports with neither port nor country coordinates, sorted by port name
    pub unlocated: Vec<UnlocatedPort>,
    /// Records skipped because they have no destination port
    pub missing_port: usize,
}

impl DestinationAggregation {
    /// Records that made it into some aggregate.
    pub fn aggregated_records(&self) -> usize {
        self.destinations
            .iter()
            .map(|d| d.counts.confirmed + d.counts.pending + d.counts.cancelled)
            .sum()
    }
}

/// Output of [`AggregationEngine::aggregate_countries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountryAggregation {
    /// Sorted by country name
    pub countries: Vec<CountryAggregate>,
    /// Destination ports whose country or country centroid is unknown
    pub unlocated: Vec<UnlocatedPort>,
    pub missing_port: usize,
}

/// Output of [`AggregationEngine::origin_ports`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OriginAggregation {
    /// Sorted by shipment count (descending), then port name
    pub ports: Vec<OriginPortStats>,
    pub unlocated: Vec<UnlocatedPort>,
}

/// Output of [`AggregationEngine::season_buckets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonSummary {
    /// Sorted by season label, most recent first
    pub buckets: Vec<SeasonBucket>,
    pub without_season: usize,
}

/// AggregationEngine groups normalized records for the map and counters.
///
/// Pure functions of their input: the reference time is passed in rather
/// than read from the clock, so the same input always yields the same output.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Groups records by destination port.
    ///
    /// Coordinates come from the port directory, then from the port's
    /// country. Records without a destination, or whose destination cannot
    /// be located either way, are left out. ETD/ETA are classified as passed
    /// when strictly before `now`.
    pub fn aggregate_destinations(
        records: &[ShipmentRecord],
        now: DateTime<Utc>,
    ) -> DestinationAggregation {
        let mut located: BTreeMap<String, PortAggregate> = BTreeMap::new();
        let mut unlocated: BTreeMap<String, usize> = BTreeMap::new();
        let mut lookups: HashMap<String, Option<ResolvedLocation>> = HashMap::new();
        let mut missing_port = 0;

        for record in records {
            let key = record.destination_port.trim().to_uppercase();
            if key.is_empty() {
                missing_port += 1;
                continue;
            }

            let location = lookups
                .entry(key.clone())
                .or_insert_with(|| locate_destination(&key))
                .clone();
            let Some(location) = location else {
                *unlocated.entry(key).or_default() += 1;
                continue;
            };

            let aggregate = located.entry(key.clone()).or_insert_with(|| PortAggregate {
                port: key,
                country: location.country.map(str::to_string),
                coordinates: location.coordinates,
                coordinate_source: location.source,
                counts: PortCounts::default(),
            });
            Self::count_record(&mut aggregate.counts, record, now);
        }

        DestinationAggregation {
            destinations: located.into_values().collect(),
            unlocated: into_unlocated(unlocated),
            missing_port,
        }
    }

    /// Groups records by the country of their destination port.
    ///
    /// Each country keeps per-port counts alongside its totals. Ports whose
    /// country is unknown, or whose country has no centroid, are left out.
    pub fn aggregate_countries(
        records: &[ShipmentRecord],
        now: DateTime<Utc>,
    ) -> CountryAggregation {
        let mut countries: BTreeMap<&'static str, CountryAggregate> = BTreeMap::new();
        let mut unlocated: BTreeMap<String, usize> = BTreeMap::new();
        let mut missing_port = 0;

        for record in records {
            let key = record.destination_port.trim().to_uppercase();
            if key.is_empty() {
                missing_port += 1;
                continue;
            }

            let Some((country, coordinates)) = CountryDirectory::fallback_for_port(&key) else {
                *unlocated.entry(key).or_default() += 1;
                continue;
            };

            let aggregate = countries.entry(country).or_insert_with(|| CountryAggregate {
                country: country.to_string(),
                coordinates,
                ports: BTreeMap::new(),
                counts: PortCounts::default(),
            });
            Self::count_record(aggregate.ports.entry(key).or_default(), record, now);
            Self::count_record(&mut aggregate.counts, record, now);
        }

        CountryAggregation {
            countries: countries.into_values().collect(),
            unlocated: into_unlocated(unlocated),
            missing_port,
        }
    }

    fn count_record(counts: &mut PortCounts, record: &ShipmentRecord, now: DateTime<Utc>) {
        counts.record_status(record.status);

        if let Some(etd) = record.etd {
            if etd < now {
                counts.etd_passed += 1;
            } else {
                counts.etd_future += 1;
            }
        }
        if let Some(eta) = record.eta {
            if eta < now {
                counts.eta_passed += 1;
            } else {
                counts.eta_future += 1;
            }
        }
    }

    /// Groups records by port of loading, whatever their status.
    ///
    /// Only the port directory is consulted; there is no country fallback
    /// for origins.
    pub fn origin_ports(records: &[ShipmentRecord]) -> OriginAggregation {
        let mut ports: BTreeMap<String, (usize, BTreeSet<String>)> = BTreeMap::new();
        let mut coordinates = HashMap::new();
        let mut unlocated: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            let key = record.origin_port.trim().to_uppercase();
            if key.is_empty() {
                continue;
            }
            let point = *coordinates
                .entry(key.clone())
                .or_insert_with(|| PortDirectory::coordinates(&key));
            if point.is_none() {
                *unlocated.entry(key).or_default() += 1;
                continue;
            }

            let (shipments, depots) = ports.entry(key).or_default();
            *shipments += 1;
            let depot = record.depot.trim();
            if !depot.is_empty() {
                depots.insert(depot.to_string());
            }
        }

        let mut stats: Vec<OriginPortStats> = ports
            .into_iter()
            .filter_map(|(port, (shipments, depots))| {
                let point = coordinates.get(&port).copied().flatten()?;
                Some(OriginPortStats {
                    port,
                    coordinates: point,
                    shipments,
                    depots: depots.into_iter().collect(),
                })
            })
            .collect();
        stats.sort_by(|a, b| b.shipments.cmp(&a.shipments).then_with(|| a.port.cmp(&b.port)));

        OriginAggregation {
            ports: stats,
            unlocated: into_unlocated(unlocated),
        }
    }

    /// Counts records per normalized season label.
    pub fn season_buckets(records: &[ShipmentRecord]) -> SeasonSummary {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut without_season = 0;

        for record in records {
            match record.season.as_deref() {
                Some(season) => *counts.entry(season).or_default() += 1,
                None => without_season += 1,
            }
        }

        SeasonSummary {
            buckets: counts
                .into_iter()
                .rev()
                .map(|(season, records)| SeasonBucket {
                    season: season.to_string(),
                    records,
                })
                .collect(),
            without_season,
        }
    }
}

fn into_unlocated(counts: BTreeMap<String, usize>) -> Vec<UnlocatedPort> {
    counts
        .into_iter()
        .map(|(port, records)| UnlocatedPort { port, records })
        .collect()
}
