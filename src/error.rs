use std::path::PathBuf;

use thiserror::Error;

/// Failures while pricing a single assistant message
#[derive(Debug, Error, PartialEq)]
pub(crate) enum CostError {
    #[error("missing key: usage_metadata")]
    MissingUsageMetadata,

    #[error("missing key: {key}. available keys: {available:?}")]
    MissingUsageField { key: String, available: Vec<String> },

    #[error("invalid value for {key}: {value} (expected a non-negative integer)")]
    InvalidUsageField { key: String, value: String },

    #[error("missing key: response_metadata.model_name")]
    MissingModelName,

    #[error("{model}: not a model name in the pricing table")]
    UnknownModel { model: String },
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {} (line {line}): {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Invalid input pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("No files match \"{pattern}\"")]
    NoMatch { pattern: String },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid pricing for \"{key}\": {reason}")]
    InvalidPricing { key: String, reason: String },

    #[error("{location}: {source}")]
    Cost { location: String, source: CostError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_error_display_missing_usage() {
        assert_eq!(
            CostError::MissingUsageMetadata.to_string(),
            "missing key: usage_metadata"
        );
    }

    #[test]
    fn cost_error_display_missing_field_lists_available_keys() {
        let e = CostError::MissingUsageField {
            key: "output_tokens".to_string(),
            available: vec!["input_tokens".to_string(), "total_tokens".to_string()],
        };
        assert_eq!(
            e.to_string(),
            r#"missing key: output_tokens. available keys: ["input_tokens", "total_tokens"]"#
        );
    }

    #[test]
    fn cost_error_display_unknown_model() {
        let e = CostError::UnknownModel {
            model: "unknown-model-x".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "unknown-model-x: not a model name in the pricing table"
        );
    }

    #[test]
    fn app_error_display_no_match() {
        let e = AppError::NoMatch {
            pattern: "runs/*.jsonl".to_string(),
        };
        assert_eq!(e.to_string(), r#"No files match "runs/*.jsonl""#);
    }

    #[test]
    fn app_error_display_cost_includes_location() {
        let e = AppError::Cost {
            location: "run.json#3".to_string(),
            source: CostError::MissingModelName,
        };
        assert_eq!(
            e.to_string(),
            "run.json#3: missing key: response_metadata.model_name"
        );
    }

    #[test]
    fn app_error_display_invalid_pricing() {
        let e = AppError::InvalidPricing {
            key: "gemini-x".to_string(),
            reason: "negative price".to_string(),
        };
        assert_eq!(e.to_string(), r#"Invalid pricing for "gemini-x": negative price"#);
    }
}
