use super::shipment::{ShipmentRecord, ShipmentStatus};
use crate::shared::error::AtlasError;
use crate::shared::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Which record date a month/week filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Ingress,
    Etd,
    Eta,
}

impl DateField {
    pub fn date_of(self, record: &ShipmentRecord) -> Option<DateTime<Utc>> {
        match self {
            DateField::Ingress => record.ingressed_at,
            DateField::Etd => record.etd,
            DateField::Eta => record.eta,
        }
    }

    /// Week number stored alongside the record, if the backend kept one.
    pub fn stored_week_of(self, record: &ShipmentRecord) -> Option<u32> {
        match self {
            DateField::Ingress => record.week_ingress,
            DateField::Etd => record.week_etd,
            DateField::Eta => record.week_eta,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DateField::Ingress => "ingress",
            DateField::Etd => "etd",
            DateField::Eta => "eta",
        }
    }
}

/// User-selected filters. Every `None` / empty field is inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    pub season: Option<String>,
    /// Any-of; a single entry is an exact client match
    pub clients: Vec<String>,
    pub executive: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub carrier: Option<String>,
    pub species: Option<String>,
    /// Inclusive lower bound on the ETD calendar date
    pub etd_from: Option<NaiveDate>,
    /// Inclusive upper bound on the ETD calendar date
    pub etd_to: Option<NaiveDate>,
    pub month_ingress: Option<u32>,
    pub month_etd: Option<u32>,
    pub month_eta: Option<u32>,
    pub week_ingress: Option<u32>,
    pub week_etd: Option<u32>,
    pub week_eta: Option<u32>,
    pub year: Option<i32>,
}

impl FilterSelection {
    pub fn month_for(&self, field: DateField) -> Option<u32> {
        match field {
            DateField::Ingress => self.month_ingress,
            DateField::Etd => self.month_etd,
            DateField::Eta => self.month_eta,
        }
    }

    pub fn week_for(&self, field: DateField) -> Option<u32> {
        match field {
            DateField::Ingress => self.week_ingress,
            DateField::Etd => self.week_etd,
            DateField::Eta => self.week_eta,
        }
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        *self == FilterSelection::default()
    }

    /// Rejects out-of-range months/weeks, blank text selections and an
    /// inverted ETD window.
    pub fn validate(&self) -> Result<()> {
        for field in [DateField::Ingress, DateField::Etd, DateField::Eta] {
            if let Some(month) = self.month_for(field) {
                if !(1..=12).contains(&month) {
                    return Err(invalid(format!(
                        "month_{} must be between 1 and 12 (got {})",
                        field.label(),
                        month
                    )));
                }
            }
            if let Some(week) = self.week_for(field) {
                if !(1..=53).contains(&week) {
                    return Err(invalid(format!(
                        "week_{} must be between 1 and 53 (got {})",
                        field.label(),
                        week
                    )));
                }
            }
        }

        if self.clients.iter().any(|c| c.trim().is_empty()) {
            return Err(invalid("client names must not be empty".to_string()));
        }

        for (name, value) in [
            ("season", &self.season),
            ("executive", &self.executive),
            ("carrier", &self.carrier),
            ("species", &self.species),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(invalid(format!("{} must not be empty when given", name)));
            }
        }

        if let (Some(from), Some(to)) = (self.etd_from, self.etd_to) {
            if from > to {
                return Err(invalid(format!(
                    "etd_from ({}) is after etd_to ({})",
                    from, to
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> anyhow::Error {
    AtlasError::Validation { message }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_and_valid() {
        let selection = FilterSelection::default();
        assert!(selection.is_empty());
        assert!(selection.validate().is_ok());
    }

    #[test]
    fn test_month_out_of_range() {
        let selection = FilterSelection {
            month_etd: Some(13),
            ..FilterSelection::default()
        };
        let err = selection.validate().unwrap_err().to_string();
        assert!(err.contains("month_etd"));
    }

    #[test]
    fn test_week_out_of_range() {
        let selection = FilterSelection {
            week_eta: Some(0),
            ..FilterSelection::default()
        };
        assert!(selection.validate().is_err());
    }

    #[test]
    fn test_blank_client_rejected() {
        let selection = FilterSelection {
            clients: vec!["ACME".to_string(), "  ".to_string()],
            ..FilterSelection::default()
        };
        assert!(selection.validate().is_err());
    }

    #[test]
    fn test_inverted_etd_window_rejected() {
        let selection = FilterSelection {
            etd_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            etd_to: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..FilterSelection::default()
        };
        let err = selection.validate().unwrap_err().to_string();
        assert!(err.contains("is after"));
    }

    #[test]
    fn test_date_field_accessors() {
        let mut record = ShipmentRecord::empty("A1");
        record.week_etd = Some(7);
        assert_eq!(DateField::Etd.stored_week_of(&record), Some(7));
        assert_eq!(DateField::Eta.stored_week_of(&record), None);
        assert!(DateField::Ingress.date_of(&record).is_none());
    }
}
