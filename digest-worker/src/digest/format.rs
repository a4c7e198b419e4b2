use std::str::FromStr;

use strum::{AsRefStr, Display};
use thiserror::Error;

use super::{CsvEncoder, DigestEncoder, JsonLinesEncoder};

/// Encoding used for digest files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DigestFormat {
    /// One JSON object per line
    Json,
    /// Header row followed by one row per record
    Csv,
}

/// Returned when the configured output format is not supported
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported output format '{0}', expected 'json' or 'csv'")]
pub struct UnknownDigestFormat(pub String);

impl DigestFormat {
    /// Returns the encoder that writes this format
    #[must_use]
    pub fn encoder(self) -> &'static dyn DigestEncoder {
        match self {
            Self::Json => &JsonLinesEncoder,
            Self::Csv => &CsvEncoder,
        }
    }
}

impl FromStr for DigestFormat {
    type Err = UnknownDigestFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(UnknownDigestFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("json".parse::<DigestFormat>(), Ok(DigestFormat::Json));
        assert_eq!("JSON".parse::<DigestFormat>(), Ok(DigestFormat::Json));
        assert_eq!(" csv\n".parse::<DigestFormat>(), Ok(DigestFormat::Csv));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let err = "html".parse::<DigestFormat>().unwrap_err();
        assert_eq!(err, UnknownDigestFormat("html".to_string()));
        assert_eq!(
            err.to_string(),
            "Unsupported output format 'html', expected 'json' or 'csv'"
        );
    }

    #[test]
    fn test_encoder_matches_format() {
        assert_eq!(DigestFormat::Json.encoder().extension(), "json");
        assert_eq!(DigestFormat::Csv.encoder().extension(), "csv");
        assert_eq!(DigestFormat::Csv.to_string(), "csv");
    }
}
