//! INI file configuration adapter.
//!
//! Recognised sections are `[valuation]`, `[universe]`, `[data]` and
//! `[report]`. Keys are looked up lazily, so unknown keys are ignored.

use crate::domain::config_validation::invalid;
use crate::domain::error::IntrinsicError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IntrinsicError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| IntrinsicError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Empty adapter; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .filter(|v| !v.trim().is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, IntrinsicError> {
        if self.get_string(section, key).is_none() {
            return Ok(default);
        }
        self.config
            .getint(section, key)
            .map(|v| v.unwrap_or(default))
            .map_err(|reason| invalid(section, key, reason))
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, IntrinsicError> {
        if self.get_string(section, key).is_none() {
            return Ok(default);
        }
        self.config
            .getfloat(section, key)
            .map(|v| v.unwrap_or(default))
            .map_err(|reason| invalid(section, key, reason))
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, IntrinsicError> {
        match self.get_string(section, key) {
            Some(v) => Self::parse_bool(v.trim()).ok_or_else(|| {
                invalid(section, key, format!("'{v}' is not true/false, yes/no or 1/0"))
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[valuation]
risk_free_rate = 0.04
projection_years = 5

[universe]
tickers = AAPL, KO, V

[data]
fundamentals_path = data/fundamentals.csv
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("universe", "tickers"),
            Some("AAPL, KO, V".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "fundamentals_path"),
            Some("data/fundamentals.csv".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[report]\ntop_n = 10\n").unwrap();
        assert_eq!(adapter.get_string("report", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_string_treats_blank_as_missing() {
        let adapter = FileConfigAdapter::from_string("[valuation]\ngrowth_rate =\n").unwrap();
        assert_eq!(adapter.get_string("valuation", "growth_rate"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[report]\ntop_n = 5\n").unwrap();
        assert_eq!(adapter.get_int("report", "top_n", 0).unwrap(), 5);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[report]\n").unwrap();
        assert_eq!(adapter.get_int("report", "top_n", 15).unwrap(), 15);
    }

    #[test]
    fn get_int_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[report]\ntop_n = ten\n").unwrap();
        let result = adapter.get_int("report", "top_n", 15);
        assert!(matches!(result, Err(IntrinsicError::ConfigInvalid { key, .. }) if key == "top_n"));
    }

    #[test]
    fn get_double_returns_value() {
        let adapter = FileConfigAdapter::from_string("[valuation]\nbeta = 1.25\n").unwrap();
        assert_eq!(adapter.get_double("valuation", "beta", 0.0).unwrap(), 1.25);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_blank() {
        let adapter =
            FileConfigAdapter::from_string("[valuation]\ngrowth_rate =\n").unwrap();
        assert_eq!(adapter.get_double("valuation", "tax_rate", 0.21).unwrap(), 0.21);
        assert_eq!(adapter.get_double("valuation", "growth_rate", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn get_double_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string(
            "[valuation]\nbeta = abc\nrisk_free_rate = 4.5%\n",
        )
        .unwrap();
        let beta = adapter.get_double("valuation", "beta", 1.0);
        assert!(matches!(beta, Err(IntrinsicError::ConfigInvalid { key, .. }) if key == "beta"));
        assert!(adapter.get_double("valuation", "risk_free_rate", 0.045).is_err());
    }

    #[test]
    fn get_bool_parses_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[report]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("report", "a", false).unwrap());
        assert!(adapter.get_bool("report", "b", false).unwrap());
        assert!(adapter.get_bool("report", "c", false).unwrap());
        assert!(!adapter.get_bool("report", "d", true).unwrap());
        assert!(!adapter.get_bool("report", "e", true).unwrap());
        assert!(!adapter.get_bool("report", "f", true).unwrap());
        assert!(adapter.get_bool("report", "missing", true).unwrap());
    }

    #[test]
    fn get_bool_rejects_unknown_spelling() {
        let adapter = FileConfigAdapter::from_string("[report]\nwrite_csv = maybe\n").unwrap();
        assert!(adapter.get_bool("report", "write_csv", true).is_err());
    }

    #[test]
    fn empty_adapter_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("universe", "tickers"), None);
        assert_eq!(adapter.get_int("report", "top_n", 15).unwrap(), 15);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\noutput_path = /tmp/recs.csv\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "output_path"),
            Some("/tmp/recs.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_config_parse_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(IntrinsicError::ConfigParse { .. })));
    }
}
