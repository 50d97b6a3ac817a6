use crate::shipment_tracking::domain::{ShipmentRecord, ShipmentStatus};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const TOP_N: usize = 10;
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRanking {
    pub client: String,
    pub containers: usize,
    pub shipments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveRanking {
    pub executive: String,
    pub shipments: usize,
    /// Percentage of the executive's shipments that are confirmed
    pub confirmation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancellationRanking {
    pub name: String,
    pub cancellations: usize,
    pub containers: usize,
}

/// Management indicators over a (usually filtered) record set.
///
/// Unless noted otherwise, metrics only consider records that are not
/// cancelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiMetrics {
    /// Every record, cancelled included
    pub total_bookings: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub confirmation_pct: f64,
    pub cancellation_pct: f64,
    pub avg_days_to_confirmation: f64,
    pub avg_transit_days: f64,
    pub avg_planned_transit_days: f64,
    /// Actual minus planned average transit
    pub transit_gap_days: f64,
    /// Share of ETAs already reached by `now` that were not overdue
    pub on_time_arrival_pct: f64,
    /// Average days overdue over the late arrivals
    pub avg_delay_days: f64,
    pub total_containers: usize,
    pub by_species: BTreeMap<String, usize>,
    pub by_temperature: BTreeMap<String, usize>,
    pub by_season: BTreeMap<String, usize>,
    pub by_client: BTreeMap<String, usize>,
    pub by_executive: BTreeMap<String, usize>,
    /// Keyed by ISO week of the ETD, `YYYY-Www`
    pub shipments_per_week: BTreeMap<String, usize>,
    /// Keyed by month of the ETD, `YYYY-MM`
    pub shipments_per_month: BTreeMap<String, usize>,
    pub top_clients: Vec<ClientRanking>,
    pub top_executives: Vec<ExecutiveRanking>,
    /// Cancelled records only
    pub top_cancelling_clients: Vec<CancellationRanking>,
    /// Cancelled records only
    pub top_cancelling_executives: Vec<CancellationRanking>,
}

/// KpiCalculator derives `KpiMetrics` from normalized records.
pub struct KpiCalculator;

impl KpiCalculator {
    /// Computes every indicator.
    ///
    /// `now` stands in for the confirmation date of confirmed bookings that
    /// carry no `updated_at`.
    pub fn calculate(records: &[ShipmentRecord], now: DateTime<Utc>) -> KpiMetrics {
        let active: Vec<&ShipmentRecord> = records
            .iter()
            .filter(|r| r.status != ShipmentStatus::Cancelled)
            .collect();
        let cancelled: Vec<&ShipmentRecord> = records
            .iter()
            .filter(|r| r.status == ShipmentStatus::Cancelled)
            .collect();

        let total_bookings = records.len();
        let confirmed = active
            .iter()
            .filter(|r| r.status == ShipmentStatus::Confirmed)
            .count();

        let days_to_confirmation = active.iter().filter_map(|r| {
            if r.status != ShipmentStatus::Confirmed {
                return None;
            }
            let days = whole_days(r.ingressed_at?, r.updated_at.unwrap_or(now));
            Some(days).filter(|d| *d >= 0.0)
        });
        let avg_transit_days = average(active.iter().filter_map(|r| {
            Some(whole_days(r.etd?, r.eta?)).filter(|d| *d >= 0.0)
        }));
        let avg_planned_transit_days = average(
            active
                .iter()
                .filter(|r| r.etd.is_some() && r.eta.is_some())
                .filter_map(|r| r.planned_transit_days),
        );

        // An ETA counts as late once `now` is any part of a day past it
        let (on_time, delays): (Vec<f64>, Vec<f64>) = active
            .iter()
            .filter(|r| r.etd.is_some())
            .filter_map(|r| r.eta.filter(|eta| *eta <= now))
            .map(|eta| whole_days(eta, now))
            .partition(|delay| *delay <= 0.0);

        let mut metrics = KpiMetrics {
            total_bookings,
            confirmed,
            cancelled: cancelled.len(),
            confirmation_pct: percentage(confirmed, total_bookings),
            cancellation_pct: percentage(cancelled.len(), total_bookings),
            avg_days_to_confirmation: average(days_to_confirmation),
            avg_transit_days,
            avg_planned_transit_days,
            transit_gap_days: avg_transit_days - avg_planned_transit_days,
            on_time_arrival_pct: percentage(on_time.len(), on_time.len() + delays.len()),
            avg_delay_days: average(delays.into_iter()),
            total_containers: active.iter().map(|r| r.container_count()).sum(),
            by_species: BTreeMap::new(),
            by_temperature: BTreeMap::new(),
            by_season: BTreeMap::new(),
            by_client: BTreeMap::new(),
            by_executive: BTreeMap::new(),
            shipments_per_week: BTreeMap::new(),
            shipments_per_month: BTreeMap::new(),
            top_clients: Self::top_clients(&active),
            top_executives: Self::top_executives(&active),
            top_cancelling_clients: Self::top_cancelling(&cancelled, |r| &r.shipper, "NO CLIENT"),
            top_cancelling_executives: Self::top_cancelling(
                &cancelled,
                |r| &r.executive,
                "NO EXECUTIVE",
            ),
        };

        for record in &active {
            bump(&mut metrics.by_species, or_label(&record.species, "Unspecified"));
            bump(
                &mut metrics.by_temperature,
                record
                    .temperature
                    .map(|t| format!("{}°C", t))
                    .unwrap_or_else(|| "No temperature".to_string()),
            );
            bump(
                &mut metrics.by_season,
                record.season.clone().unwrap_or_else(|| "No season".to_string()),
            );
            bump(&mut metrics.by_client, or_label(&record.shipper, "No client"));
            bump(&mut metrics.by_executive, or_label(&record.executive, "No executive"));

            if let Some(etd) = record.etd {
                let week = etd.iso_week();
                bump(
                    &mut metrics.shipments_per_week,
                    format!("{}-W{:02}", week.year(), week.week()),
                );
                bump(
                    &mut metrics.shipments_per_month,
                    format!("{}-{:02}", etd.year(), etd.month()),
                );
            }
        }

        metrics
    }

    fn top_clients(active: &[&ShipmentRecord]) -> Vec<ClientRanking> {
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for record in active {
            let entry = stats.entry(ranking_key(&record.shipper, "NO CLIENT")).or_default();
            entry.0 += record.container_count();
            entry.1 += 1;
        }

        let mut ranking: Vec<ClientRanking> = stats
            .into_iter()
            .map(|(client, (containers, shipments))| ClientRanking {
                client,
                containers,
                shipments,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.containers
                .cmp(&a.containers)
                .then_with(|| b.shipments.cmp(&a.shipments))
                .then_with(|| a.client.cmp(&b.client))
        });
        ranking.truncate(TOP_N);
        ranking
    }

    fn top_executives(active: &[&ShipmentRecord]) -> Vec<ExecutiveRanking> {
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for record in active {
            let entry = stats
                .entry(ranking_key(&record.executive, "NO EXECUTIVE"))
                .or_default();
            entry.0 += 1;
            if record.status == ShipmentStatus::Confirmed {
                entry.1 += 1;
            }
        }

        let mut ranking: Vec<ExecutiveRanking> = stats
            .into_iter()
            .map(|(executive, (shipments, confirmed))| ExecutiveRanking {
                executive,
                shipments,
                confirmation_rate: percentage(confirmed, shipments),
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.shipments
                .cmp(&a.shipments)
                .then_with(|| a.executive.cmp(&b.executive))
        });
        ranking.truncate(TOP_N);
        ranking
    }

    fn top_cancelling(
        cancelled: &[&ShipmentRecord],
        name_of: impl Fn(&ShipmentRecord) -> &String,
        missing: &str,
    ) -> Vec<CancellationRanking> {
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for record in cancelled {
            let entry = stats.entry(ranking_key(name_of(record), missing)).or_default();
            entry.0 += 1;
            entry.1 += record.container_count();
        }

        let mut ranking: Vec<CancellationRanking> = stats
            .into_iter()
            .map(|(name, (cancellations, containers))| CancellationRanking {
                name,
                cancellations,
                containers,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.cancellations
                .cmp(&a.cancellations)
                .then_with(|| b.containers.cmp(&a.containers))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranking.truncate(TOP_N);
        ranking
    }
}

fn bump(map: &mut BTreeMap<String, usize>, key: String) {
    *map.entry(key).or_default() += 1;
}

fn or_label(value: &str, missing: &str) -> String {
    if value.is_empty() {
        missing.to_string()
    } else {
        value.to_string()
    }
}

/// Rankings merge names that only differ in case or padding.
fn ranking_key(value: &str, missing: &str) -> String {
    let key = value.trim().to_uppercase();
    if key.is_empty() {
        missing.to_string()
    } else {
        key
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Whole days from `from` to `to`, rounded up.
fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    ((to - from).num_seconds() as f64 / SECONDS_PER_DAY).ceil()
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
