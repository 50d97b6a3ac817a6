use crate::application::read_models::{
    CountryView, DashboardReport, DestinationView, ExclusionSummary, TableView,
};
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;
use crate::shipment_tracking::domain::{
    ActiveVessel, CoordinateSource, FilterSelection, FulfillmentState, OriginPortStats,
};
use crate::shipment_tracking::services::{DashboardCounts, KpiMetrics, SeasonSummary};

/// Markdown table header for destination ports
const DESTINATION_TABLE_HEADER: &str =
    "| Port | Country | State | Confirmed | Pending | Cancelled | Departed | Arrived | Total |\n";

/// Markdown table separator line for destination ports
const DESTINATION_TABLE_SEPARATOR: &str =
    "|------|---------|-------|-----------|---------|-----------|----------|---------|-------|\n";

/// Markdown table header for active vessels
const VESSEL_TABLE_HEADER: &str =
    "| Vessel | Position | Last Fix | ETD | ETA | Destination | Bookings |\n";

/// Markdown table separator line for active vessels
const VESSEL_TABLE_SEPARATOR: &str =
    "|--------|----------|----------|-----|-----|-------------|----------|\n";

/// MarkdownFormatter adapter rendering the dashboard as a Markdown document
///
/// Sections follow the dashboard layout: counters, indicators, destination
/// and origin ports, seasons, vessels at sea, the shipments grid and finally
/// what was left out and why.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn or_dash(text: Option<&str>) -> String {
        match text {
            Some(t) if !t.trim().is_empty() => Self::escape_markdown_table_cell(t),
            _ => "-".to_string(),
        }
    }

    fn state_label(state: FulfillmentState) -> &'static str {
        match state {
            FulfillmentState::Arrived => "🟢 Arrived",
            FulfillmentState::Departed => "🟡 Departed",
            FulfillmentState::Scheduled => "⚪ Scheduled",
        }
    }

    /// Active filters as `name: value` pairs, in a fixed order.
    fn describe_selection(selection: &FilterSelection) -> Vec<String> {
        let mut parts = Vec::new();
        let mut push = |name: &str, value: Option<String>| {
            if let Some(v) = value {
                parts.push(format!("{}: {}", name, v));
            }
        };
        push("Season", selection.season.clone());
        push(
            "Client",
            (!selection.clients.is_empty()).then(|| selection.clients.join(", ")),
        );
        push("Executive", selection.executive.clone());
        push("Status", selection.status.map(|s| s.to_string()));
        push("Carrier", selection.carrier.clone());
        push("Species", selection.species.clone());
        push("ETD from", selection.etd_from.map(|d| d.to_string()));
        push("ETD to", selection.etd_to.map(|d| d.to_string()));
        push("Ingress month", selection.month_ingress.map(|m| m.to_string()));
        push("ETD month", selection.month_etd.map(|m| m.to_string()));
        push("ETA month", selection.month_eta.map(|m| m.to_string()));
        push("Ingress week", selection.week_ingress.map(|w| w.to_string()));
        push("ETD week", selection.week_etd.map(|w| w.to_string()));
        push("ETA week", selection.week_eta.map(|w| w.to_string()));
        push("Year", selection.year.map(|y| y.to_string()));
        parts
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &DashboardReport) {
        output.push_str("# Shipment Dashboard\n\n");
        output.push_str(&format!(
            "Generated at {} (report `{}`)\n\n",
            report.generated_at.to_rfc3339(),
            report.report_id
        ));

        let filters = Self::describe_selection(&report.selection);
        if filters.is_empty() {
            output.push_str("**Filters:** none\n\n");
        } else {
            output.push_str(&format!(
                "**Filters:** {}\n\n",
                Self::escape_markdown_table_cell(&filters.join("; "))
            ));
        }
    }

    fn render_counts(&self, output: &mut String, counts: &DashboardCounts) {
        output.push_str("## Overview\n\n");
        output.push_str("| Metric | Value |\n|--------|-------|\n");
        let rows = [
            ("Records", counts.total_records),
            ("References", counts.total_references),
            ("Containers", counts.total_containers),
            ("Pending", counts.pending),
            ("Confirmed", counts.confirmed),
            ("Cancelled", counts.cancelled),
        ];
        for (label, value) in rows {
            output.push_str(&format!("| {} | {} |\n", label, value));
        }
        output.push('\n');
    }

    fn render_kpis(&self, output: &mut String, kpis: &KpiMetrics) {
        output.push_str("## Indicators\n\n");
        output.push_str("| Indicator | Value |\n|-----------|-------|\n");
        output.push_str(&format!("| Bookings | {} |\n", kpis.total_bookings));
        output.push_str(&format!(
            "| Confirmed | {} ({:.1}%) |\n",
            kpis.confirmed, kpis.confirmation_pct
        ));
        output.push_str(&format!(
            "| Cancelled | {} ({:.1}%) |\n",
            kpis.cancelled, kpis.cancellation_pct
        ));
        output.push_str(&format!(
            "| Avg. days to confirmation | {:.1} |\n",
            kpis.avg_days_to_confirmation
        ));
        output.push_str(&format!(
            "| Avg. transit days (actual / planned) | {:.1} / {:.1} |\n",
            kpis.avg_transit_days, kpis.avg_planned_transit_days
        ));
        output.push_str(&format!(
            "| On-time arrivals | {:.1}% (avg. delay {:.1} days) |\n",
            kpis.on_time_arrival_pct, kpis.avg_delay_days
        ));
        output.push_str(&format!(
            "| Containers | {} |\n\n",
            kpis.total_containers
        ));

        if !kpis.top_clients.is_empty() {
            output.push_str("### Top Clients\n\n");
            output.push_str("| Client | Containers | Shipments |\n|--------|------------|-----------|\n");
            for ranking in &kpis.top_clients {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(&ranking.client),
                    ranking.containers,
                    ranking.shipments
                ));
            }
            output.push('\n');
        }

        if !kpis.top_executives.is_empty() {
            output.push_str("### Top Executives\n\n");
            output.push_str(
                "| Executive | Shipments | Confirmation |\n|-----------|-----------|--------------|\n",
            );
            for ranking in &kpis.top_executives {
                output.push_str(&format!(
                    "| {} | {} | {:.1}% |\n",
                    Self::escape_markdown_table_cell(&ranking.executive),
                    ranking.shipments,
                    ranking.confirmation_rate
                ));
            }
            output.push('\n');
        }
    }

    fn render_destinations(&self, output: &mut String, destinations: &[DestinationView]) {
        output.push_str("## Destination Ports\n\n");
        if destinations.is_empty() {
            output.push_str("*No destinations to show*\n\n");
            return;
        }

        output.push_str(DESTINATION_TABLE_HEADER);
        output.push_str(DESTINATION_TABLE_SEPARATOR);
        for destination in destinations {
            let port = match destination.coordinate_source {
                CoordinateSource::Port => Self::escape_markdown_table_cell(&destination.port),
                CoordinateSource::Country => format!(
                    "{} (approx.)",
                    Self::escape_markdown_table_cell(&destination.port)
                ),
            };
            let counts = &destination.counts;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                port,
                Self::or_dash(destination.country.as_deref()),
                Self::state_label(destination.state),
                counts.confirmed,
                counts.pending,
                counts.cancelled,
                counts.etd_passed,
                counts.eta_passed,
                counts.total
            ));
        }
        output.push('\n');
    }

    fn render_countries(&self, output: &mut String, countries: &[CountryView]) {
        output.push_str("## Destination Countries\n\n");
        if countries.is_empty() {
            output.push_str("*No destination countries to show*\n\n");
            return;
        }

        output.push_str("| Country | Ports | State | Confirmed | Pending | Cancelled | Total |\n");
        output.push_str("|---------|-------|-------|-----------|---------|-----------|-------|\n");
        for country in countries {
            let ports: Vec<String> = country
                .ports
                .iter()
                .map(|(port, counts)| format!("{} ({})", port, counts.total))
                .collect();
            let counts = &country.counts;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&country.country),
                Self::escape_markdown_table_cell(&ports.join(", ")),
                Self::state_label(country.state),
                counts.confirmed,
                counts.pending,
                counts.cancelled,
                counts.total
            ));
        }
        output.push('\n');
    }

    fn render_origins(&self, output: &mut String, origins: &[OriginPortStats]) {
        output.push_str("## Origin Ports\n\n");
        if origins.is_empty() {
            output.push_str("*No origin ports to show*\n\n");
            return;
        }

        output.push_str("| Port | Shipments | Depots |\n|------|-----------|--------|\n");
        for origin in origins {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&origin.port),
                origin.shipments,
                Self::or_dash(Some(&origin.depots.join(", ")))
            ));
        }
        output.push('\n');
    }

    fn render_seasons(&self, output: &mut String, seasons: &SeasonSummary) {
        output.push_str("## Seasons\n\n");
        if seasons.buckets.is_empty() {
            output.push_str("*No seasons recorded*\n\n");
        } else {
            output.push_str("| Season | Records |\n|--------|---------|\n");
            for bucket in &seasons.buckets {
                output.push_str(&format!(
                    "| {} | {} |\n",
                    Self::escape_markdown_table_cell(&bucket.season),
                    bucket.records
                ));
            }
            output.push('\n');
        }
        if seasons.without_season > 0 {
            output.push_str(&format!(
                "{} record(s) carry no season.\n\n",
                seasons.without_season
            ));
        }
    }

    fn render_vessels(&self, output: &mut String, vessels: &[ActiveVessel]) {
        output.push_str("## Vessels at Sea\n\n");
        output.push_str(VESSEL_TABLE_HEADER);
        output.push_str(VESSEL_TABLE_SEPARATOR);
        for vessel in vessels {
            let position = vessel
                .coordinates()
                .map(|c| format!("{:.4}, {:.4}", c.lat, c.lon))
                .unwrap_or_else(|| "unknown".to_string());
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&vessel.vessel_name),
                position,
                Self::or_dash(vessel.last_position_at.as_deref()),
                Self::or_dash(vessel.etd.as_deref()),
                Self::or_dash(vessel.eta.as_deref()),
                Self::or_dash(vessel.destination.as_deref()),
                Self::or_dash(Some(&vessel.bookings.join(", ")))
            ));
        }
        output.push('\n');
    }

    fn render_table(&self, output: &mut String, table: &TableView) {
        output.push_str("## Shipments\n\n");
        if table.active_filters > 0 {
            output.push_str(&format!(
                "Showing {} of {} row(s), {} table filter(s) active.\n\n",
                table.rows.len(),
                table.source_rows,
                table.active_filters
            ));
        }
        if table.rows.is_empty() {
            output.push_str("*No shipments match the current filters*\n\n");
            return;
        }

        let labels: Vec<&str> = table.columns.iter().map(|c| c.label).collect();
        output.push_str(&format!("| {} |\n", labels.join(" | ")));
        let separators: Vec<String> = table
            .columns
            .iter()
            .map(|c| "-".repeat(c.label.chars().count().max(3)))
            .collect();
        output.push_str(&format!("|{}|\n", separators.join("|")));

        for row in &table.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| Self::escape_markdown_table_cell(cell))
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');
    }

    fn render_exclusions(&self, output: &mut String, excluded: &ExclusionSummary) {
        let mut lines = Vec::new();
        if excluded.deleted > 0 {
            lines.push(format!("{} deleted record(s) ignored", excluded.deleted));
        }
        if excluded.missing_reference > 0 {
            lines.push(format!(
                "{} record(s) without reference ignored",
                excluded.missing_reference
            ));
        }
        if excluded.filtered_out > 0 {
            lines.push(format!(
                "{} record(s) outside the current filters",
                excluded.filtered_out
            ));
        }
        if excluded.missing_destination_port > 0 {
            lines.push(format!(
                "{} record(s) without destination port",
                excluded.missing_destination_port
            ));
        }
        for unlocated in &excluded.unlocated_destinations {
            lines.push(format!(
                "Destination `{}` could not be located ({} record(s))",
                unlocated.port, unlocated.records
            ));
        }
        for unlocated in &excluded.unlocated_origins {
            lines.push(format!(
                "Origin port `{}` could not be located ({} record(s))",
                unlocated.port, unlocated.records
            ));
        }
        if !excluded.unrecognized_statuses.is_empty() {
            lines.push(format!(
                "Unrecognized status value(s) counted as pending: {}",
                excluded.unrecognized_statuses.join(", ")
            ));
        }

        if lines.is_empty() {
            return;
        }
        output.push_str("## Not on the Map\n\n");
        for line in lines {
            output.push_str(&format!("- {}\n", line));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for MarkdownFormatter {
    fn format(&self, report: &DashboardReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);
        self.render_counts(&mut output, &report.counts);
        self.render_kpis(&mut output, &report.kpis);
        self.render_destinations(&mut output, &report.destinations);
        self.render_countries(&mut output, &report.countries);
        self.render_origins(&mut output, &report.origins);
        self.render_seasons(&mut output, &report.seasons);
        if !report.vessels.is_empty() {
            self.render_vessels(&mut output, &report.vessels);
        }
        self.render_table(&mut output, &report.table);
        self.render_exclusions(&mut output, &report.excluded);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::LoadSummary;
    use crate::application::read_models::DashboardReportBuilder;
    use crate::application::session::DashboardSession;
    use crate::shipment_tracking::domain::{ShipmentRecord, ShipmentStatus};
    use chrono::{TimeZone, Utc};

    fn record(reference: &str, pod: &str, shipper: &str, status: ShipmentStatus) -> ShipmentRecord {
        let mut record = ShipmentRecord::empty(reference);
        record.destination_port = pod.to_string();
        record.origin_port = "VALPARAISO".to_string();
        record.shipper = shipper.to_string();
        record.season = Some("2024-2025".to_string());
        record.status = status;
        record.status_recognized = true;
        record
    }

    fn report(selection: FilterSelection, summary: LoadSummary) -> DashboardReport {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let records = vec![
            record("A1", "ROTTERDAM", "ACME | FRUITS", ShipmentStatus::Confirmed),
            record("A2", "ATLANTIS", "ACME | FRUITS", ShipmentStatus::Pending),
            record("A3", "ROTTERDAM", "OTHER", ShipmentStatus::Cancelled),
        ];
        let session = DashboardSession::new(records, selection, now).unwrap();
        DashboardReportBuilder::build(&session, &summary)
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(
            MarkdownFormatter::escape_markdown_table_cell("a|b\nc"),
            "a\\|b c"
        );
    }

    #[test]
    fn test_format_section_ordering() {
        let output = MarkdownFormatter::new()
            .format(&report(FilterSelection::default(), LoadSummary::default()))
            .unwrap();

        let headings = [
            "# Shipment Dashboard",
            "## Overview",
            "## Indicators",
            "## Destination Ports",
            "## Destination Countries",
            "## Origin Ports",
            "## Seasons",
            "## Shipments",
            "## Not on the Map",
        ];
        let mut last = 0;
        for heading in headings {
            let pos = output
                .find(heading)
                .unwrap_or_else(|| panic!("missing {}", heading));
            assert!(pos >= last, "{} out of order", heading);
            last = pos;
        }
        assert!(output.contains("**Filters:** none"));
        assert!(!output.contains("## Vessels at Sea"));
    }

    #[test]
    fn test_format_destination_rows() {
        let output = MarkdownFormatter::new()
            .format(&report(FilterSelection::default(), LoadSummary::default()))
            .unwrap();

        assert!(output.contains(DESTINATION_TABLE_HEADER));
        assert!(output.contains("| ROTTERDAM |"));
        assert!(output.contains("| NETHERLANDS | ROTTERDAM (2) | ⚪ Scheduled |"));
        assert!(output.contains("Destination `ATLANTIS` could not be located (1 record(s))"));
    }

    #[test]
    fn test_format_escapes_client_names_in_grid() {
        let output = MarkdownFormatter::new()
            .format(&report(FilterSelection::default(), LoadSummary::default()))
            .unwrap();

        assert!(output.contains("ACME \\| FRUITS"));
        assert!(!output.contains("| ACME | FRUITS |"));
    }

    #[test]
    fn test_format_lists_active_filters_and_exclusions() {
        let selection = FilterSelection {
            clients: vec!["OTHER".to_string()],
            ..FilterSelection::default()
        };
        let summary = LoadSummary {
            fetched: 5,
            deleted: 2,
            missing_reference: 0,
            unknown_statuses: vec!["ROLEADO".to_string()],
        };
        let output = MarkdownFormatter::new()
            .format(&report(selection, summary))
            .unwrap();

        assert!(output.contains("**Filters:** Client: OTHER"));
        assert!(output.contains("- 2 deleted record(s) ignored"));
        assert!(output.contains("- 2 record(s) outside the current filters"));
        assert!(output.contains("counted as pending: ROLEADO"));
    }

    #[test]
    fn test_format_empty_grid() {
        let selection = FilterSelection {
            clients: vec!["NOBODY".to_string()],
            ..FilterSelection::default()
        };
        let output = MarkdownFormatter::new()
            .format(&report(selection, LoadSummary::default()))
            .unwrap();

        assert!(output.contains("*No shipments match the current filters*"));
        assert!(output.contains("*No destinations to show*"));
    }
}
