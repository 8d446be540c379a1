use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use std::str::FromStr;
use valenzdrift::engine::config::SearchConfigBuilder;

/// Resolves the final configuration for one run.
///
/// Each value is taken from the first layer that sets it: `--set` overrides,
/// dedicated CLI flags, the TOML file, then built-in defaults.
/// `clauses_per_var` is the subcommand's own ratio flag, if it has one.
pub fn build_config(args: &SearchArgs, clauses_per_var: Option<f64>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let overrides = apply_set_values(FileConfig::default(), &args.set_values)?;

    let file_search = file_config.search.unwrap_or_default();
    let set_search = overrides.search.unwrap_or_default();

    let max_iterations = set_search
        .max_iterations
        .or(args.max_iterations)
        .or(file_search.max_iterations)
        .unwrap_or(defaults.max_iterations);
    let p_local = set_search
        .p_local
        .or(args.p_local)
        .or(file_search.p_local)
        .unwrap_or(defaults.p_local);
    let seed = set_search.seed.or(args.seed).or(file_search.seed);
    let record_trace = set_search
        .record_trace
        .or(args.no_trace.then_some(false))
        .or(file_search.record_trace)
        .unwrap_or(defaults.record_trace);

    let clauses_per_var = overrides
        .generator
        .and_then(|g| g.clauses_per_var)
        .or(clauses_per_var)
        .or(file_config.generator.and_then(|g| g.clauses_per_var))
        .unwrap_or(defaults.clauses_per_var);
    if !(clauses_per_var.is_finite() && clauses_per_var > 0.0) {
        return Err(CliError::Config(format!(
            "clauses-per-var must be a positive number, got {}",
            clauses_per_var
        )));
    }

    let search = SearchConfigBuilder::new()
        .max_iterations(max_iterations)
        .p_local(p_local)
        .seed(seed)
        .record_trace(record_trace)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        search,
        clauses_per_var,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "search.max-iterations" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .max_iterations = Some(parse_value(key, value_str, "integer")?);
            }
            "search.p-local" => {
                config.search.get_or_insert_with(Default::default).p_local =
                    Some(parse_value(key, value_str, "float")?);
            }
            "search.seed" => {
                config.search.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.record-trace" => {
                config.search.get_or_insert_with(Default::default).record_trace =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "generator.clauses-per-var" => {
                config
                    .generator
                    .get_or_insert_with(Default::default)
                    .clauses_per_var = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("valenz.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_any_input() {
        let app = build_config(&SearchArgs::default(), None).unwrap();
        let defaults = DefaultsConfig::default();

        assert_eq!(app.search.max_iterations, defaults.max_iterations);
        assert_eq!(app.search.p_local, defaults.p_local);
        assert_eq!(app.search.seed, None);
        assert!(app.search.record_trace);
        assert_eq!(app.clauses_per_var, defaults.clauses_per_var);
    }

    #[test]
    fn file_values_fill_in_missing_flags() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [search]
            max-iterations = 750
            p-local = 0.2
            seed = 5
            record-trace = false

            [generator]
            clauses-per-var = 3.0
            "#,
        );
        let args = SearchArgs {
            config: Some(path),
            ..SearchArgs::default()
        };

        let app = build_config(&args, None).unwrap();
        assert_eq!(app.search.max_iterations, 750);
        assert_eq!(app.search.p_local, 0.2);
        assert_eq!(app.search.seed, Some(5));
        assert!(!app.search.record_trace);
        assert_eq!(app.clauses_per_var, 3.0);
    }

    #[test]
    fn flags_override_file_and_set_overrides_flags() {
        let dir = tempdir().unwrap();
        let path = write_config(&dir, "[search]\nmax-iterations = 750\np-local = 0.2\n");
        let args = SearchArgs {
            config: Some(path),
            max_iterations: Some(900),
            p_local: Some(0.4),
            seed: Some(1),
            no_trace: true,
            set_values: vec![
                "search.p-local=0.9".to_string(),
                "generator.clauses-per-var=4.0".to_string(),
            ],
        };

        let app = build_config(&args, Some(2.0)).unwrap();
        assert_eq!(app.search.max_iterations, 900);
        assert_eq!(app.search.p_local, 0.9);
        assert_eq!(app.search.seed, Some(1));
        assert!(!app.search.record_trace);
        assert_eq!(app.clauses_per_var, 4.0);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["search.seed", "search.seed=abc", "search.unknown=1", "search.record-trace=maybe"] {
            let args = SearchArgs {
                set_values: vec![bad.to_string()],
                ..SearchArgs::default()
            };
            assert!(
                matches!(build_config(&args, None), Err(CliError::Config(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_search_parameters_surface_as_config_errors() {
        let args = SearchArgs {
            p_local: Some(1.5),
            ..SearchArgs::default()
        };
        let err = build_config(&args, None).unwrap_err();
        assert!(err.to_string().contains("p_local"));

        let args = SearchArgs {
            max_iterations: Some(0),
            ..SearchArgs::default()
        };
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        assert!(matches!(
            build_config(&SearchArgs::default(), Some(-1.0)),
            Err(CliError::Config(_))
        ));
    }
}
