//! Output formats shared by rendering, configuration and the CLI.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How evaluations, tables and state listings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Aligned table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_output_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Table).unwrap(), "\"table\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }

    #[test]
    fn test_output_format_value_enum() {
        assert_eq!(
            OutputFormat::from_str("plain", true).unwrap(),
            OutputFormat::Plain
        );
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }
}
