//! GST rate configuration file.
//!
//! ```toml
//! # 9% CGST + 9% SGST
//! combined_rate = 0.18
//! ```

use std::path::{Path, PathBuf};

use gst_core::{GstConfig, GstConfigError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid GST configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] GstConfigError),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse and validate a GST configuration.
pub fn parse_gst_config(input: &str) -> Result<GstConfig, ConfigError> {
    let config: GstConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

/// Load the GST configuration at `path`, or the default 2.5% + 2.5% split
/// when no path is given.
pub fn load_gst_config(path: Option<&Path>) -> Result<GstConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(GstConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_gst_config(&contents)?;
    info!(path = %path.display(), combined_rate = %config.combined_rate, "loaded GST configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_combined_rate() {
        let config = parse_gst_config("combined_rate = 0.18").expect("config should parse");

        assert_eq!(config.combined_rate, dec!(0.18));
        assert_eq!(config.central_rate(), dec!(0.09));
    }

    #[test]
    fn parses_quoted_rate() {
        let config = parse_gst_config("combined_rate = \"0.05\"").expect("config should parse");

        assert_eq!(config, GstConfig::default());
    }

    #[test]
    fn rejects_out_of_range_rate() {
        let result = parse_gst_config("combined_rate = 5");

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(GstConfigError::InvalidCombinedRate(_)))
        ));
    }

    #[test]
    fn rejects_missing_rate() {
        let result = parse_gst_config("");

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn no_path_means_default() {
        let config = load_gst_config(None).expect("default config");

        assert_eq!(config, GstConfig::default());
    }
}
