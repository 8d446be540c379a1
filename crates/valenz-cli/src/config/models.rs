use valenzdrift::engine::config::SearchConfig;

/// Fully resolved settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub clauses_per_var: f64,
}
