use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::DashboardFormatter;

/// Factory for creating dashboard formatters
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for the given output format
    ///
    /// # Examples
    /// ```
    /// use shipment_atlas::application::dto::OutputFormat;
    /// use shipment_atlas::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn DashboardFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Progress line shown while rendering in `format`.
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Rendering JSON dashboard report...",
            OutputFormat::Markdown => "📝 Rendering Markdown dashboard report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_messages() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Rendering JSON dashboard report..."
        );
        assert!(FormatterFactory::progress_message(OutputFormat::Markdown).contains("Markdown"));
    }
}
