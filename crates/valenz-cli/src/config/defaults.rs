use valenzdrift::core::generator::DEFAULT_CLAUSE_RATIO;
use valenzdrift::engine::config::{DEFAULT_MAX_ITERATIONS, DEFAULT_P_LOCAL};

pub struct DefaultsConfig {
    pub max_iterations: u64,
    pub p_local: f64,
    pub record_trace: bool,
    pub clauses_per_var: f64,
    pub runs: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            p_local: DEFAULT_P_LOCAL,
            record_trace: true,
            clauses_per_var: DEFAULT_CLAUSE_RATIO,
            runs: 3,
        }
    }
}
