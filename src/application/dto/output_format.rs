use serde::Deserialize;

/// Output format of the rendered dashboard report
///
/// Shared by the CLI, the config file and the formatter factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-readable JSON report (default)
    #[default]
    Json,
    /// Human-readable Markdown tables
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_str_accepts_aliases_and_case() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(
            OutputFormat::from_str(" Markdown ").unwrap(),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let error = OutputFormat::from_str("csv").unwrap_err();
        assert!(error.contains("Invalid format: csv"));
        assert!(error.contains("'json' or 'markdown'"));
    }

    #[test]
    fn test_display_and_extension() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::Markdown.file_extension(), "md");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let format: OutputFormat = serde_yaml_ng::from_str("md").unwrap();
        assert_eq!(format, OutputFormat::Markdown);
        let format: OutputFormat = serde_yaml_ng::from_str("json").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
