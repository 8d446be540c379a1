use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Empty formula: at least one clause with at least one literal is required")]
    EmptyFormula,

    #[error("Formula declares {num_vars} variables, more than the supported {limit}")]
    TooManyVariables { num_vars: usize, limit: usize },

    #[error("Invalid search configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
