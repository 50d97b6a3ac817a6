/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the use cases and results back out to the CLI,
/// keeping the domain layer isolated from adapters.
mod dashboard_request;
mod dashboard_response;
mod output_format;

pub use dashboard_request::DashboardRequest;
pub use dashboard_response::{DashboardResponse, LoadSummary};
pub use output_format::OutputFormat;
