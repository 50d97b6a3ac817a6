use crate::application::read_models::DashboardReport;
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the dashboard report as pretty JSON
///
/// The shipments grid is not part of the JSON document; consumers rebuild
/// their own table from the destination and vessel data.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for JsonFormatter {
    fn format(&self, report: &DashboardReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
