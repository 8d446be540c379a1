use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub max_iterations: Option<u64>,
    pub p_local: Option<f64>,
    pub seed: Option<u64>,
    pub record_trace: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGeneratorConfig {
    pub clauses_per_var: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub search: Option<FileSearchConfig>,
    pub generator: Option<FileGeneratorConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_both_sections_in_kebab_case() {
        let config = FileConfig::from_toml(
            r#"
            [search]
            max-iterations = 2500
            p-local = 0.25
            seed = 11
            record-trace = false

            [generator]
            clauses-per-var = 3.5
            "#,
        )
        .unwrap();

        let search = config.search.unwrap();
        assert_eq!(search.max_iterations, Some(2500));
        assert_eq!(search.p_local, Some(0.25));
        assert_eq!(search.seed, Some(11));
        assert_eq!(search.record_trace, Some(false));
        assert_eq!(config.generator.unwrap().clauses_per_var, Some(3.5));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[search]\nmax_iterations = 5\n").is_err());
        assert!(FileConfig::from_toml("[annealing]\nrate = 0.9\n").is_err());
    }

    #[test]
    fn from_file_reports_the_offending_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[search]\np-local = \"high\"\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parsing error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
