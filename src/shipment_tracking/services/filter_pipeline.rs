use super::record_normalizer::normalize_season;
use crate::shipment_tracking::domain::{DateField, FilterSelection, ShipmentRecord};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeSet;

/// Choices offered to the user for each text filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Every season present, most recent first
    pub seasons: Vec<String>,
    pub clients: Vec<String>,
    pub executives: Vec<String>,
    pub carriers: Vec<String>,
    pub species: Vec<String>,
}

/// FilterPipeline applies a `FilterSelection` to a record set.
///
/// Active filters are combined with AND. The pipeline holds no state, so
/// applying the same selection to the same input always gives the same
/// output.
pub struct FilterPipeline;

impl FilterPipeline {
    /// Records satisfying every active filter, in input order.
    pub fn apply(records: &[ShipmentRecord], selection: &FilterSelection) -> Vec<ShipmentRecord> {
        if selection.is_empty() {
            return records.to_vec();
        }
        let season = selection.season.as_deref().and_then(normalize_season);
        records
            .iter()
            .filter(|r| Self::matches_with_season(r, selection, season.as_deref()))
            .cloned()
            .collect()
    }

    /// True when `record` passes every active filter in `selection`.
    pub fn matches(record: &ShipmentRecord, selection: &FilterSelection) -> bool {
        let season = selection.season.as_deref().and_then(normalize_season);
        Self::matches_with_season(record, selection, season.as_deref())
    }

    fn matches_with_season(
        record: &ShipmentRecord,
        selection: &FilterSelection,
        season: Option<&str>,
    ) -> bool {
        if let Some(season) = season {
            if record.season.as_deref() != Some(season) {
                return false;
            }
        }

        if !selection.clients.is_empty()
            && !selection
                .clients
                .iter()
                .any(|client| same_text(client, &record.shipper))
        {
            return false;
        }

        let text_filters = [
            (&selection.executive, &record.executive),
            (&selection.carrier, &record.carrier),
            (&selection.species, &record.species),
        ];
        for (wanted, actual) in text_filters {
            if let Some(wanted) = wanted {
                if !same_text(wanted, actual) {
                    return false;
                }
            }
        }

        if let Some(status) = selection.status {
            if record.status != status {
                return false;
            }
        }

        if selection.etd_from.is_some() || selection.etd_to.is_some() {
            let Some(etd) = record.etd.map(|d| d.date_naive()) else {
                return false;
            };
            if selection.etd_from.is_some_and(|from| etd < from)
                || selection.etd_to.is_some_and(|to| etd > to)
            {
                return false;
            }
        }

        for field in [DateField::Ingress, DateField::Etd, DateField::Eta] {
            if let Some(month) = selection.month_for(field) {
                if field.date_of(record).map(|d| d.month()) != Some(month) {
                    return false;
                }
            }
            if let Some(week) = selection.week_for(field) {
                if week_of(record, field) != Some(week) {
                    return false;
                }
            }
        }

        if let Some(year) = selection.year {
            let in_year = [DateField::Ingress, DateField::Etd, DateField::Eta]
                .iter()
                .filter_map(|field| field.date_of(record))
                .any(|d| d.year() == year);
            if !in_year {
                return false;
            }
        }

        true
    }

    /// Derives the filter choices.
    ///
    /// Seasons come from every record. Clients, executives, carriers and
    /// species come from the records in `season` only, so they narrow when a
    /// season is picked.
    pub fn options(records: &[ShipmentRecord], season: Option<&str>) -> FilterOptions {
        let seasons: BTreeSet<&str> = records.iter().filter_map(|r| r.season.as_deref()).collect();

        let season = season.and_then(normalize_season);
        let in_season: Vec<&ShipmentRecord> = records
            .iter()
            .filter(|r| season.is_none() || r.season.as_deref() == season.as_deref())
            .collect();

        FilterOptions {
            seasons: seasons.into_iter().rev().map(str::to_string).collect(),
            clients: distinct_sorted(in_season.iter().map(|r| r.shipper.as_str())),
            executives: distinct_sorted(in_season.iter().map(|r| r.executive.as_str())),
            carriers: distinct_sorted(in_season.iter().map(|r| r.carrier.as_str())),
            species: distinct_sorted(in_season.iter().map(|r| r.species.as_str())),
        }
    }
}

/// Week number of `field`: the stored value when the backend kept one,
/// otherwise the ISO week of the date.
pub fn week_of(record: &ShipmentRecord, field: DateField) -> Option<u32> {
    field
        .stored_week_of(record)
        .or_else(|| field.date_of(record).map(|d| d.iso_week().week()))
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    let mut sorted: Vec<String> = unique.into_iter().map(str::to_string).collect();
    sorted.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    sorted
}
