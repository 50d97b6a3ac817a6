use crate::application::read_models::DashboardReport;
use crate::shared::Result;

/// DashboardFormatter port for rendering a dashboard report
///
/// This port abstracts the output format (JSON, Markdown, etc.).
pub trait DashboardFormatter {
    /// Formats the dashboard report
    ///
    /// # Arguments
    /// * `report` - Read model holding counts, KPIs, aggregates and vessels
    ///
    /// # Returns
    /// The rendered report as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &DashboardReport) -> Result<String>;
}
