use crate::model::GridSize;
use crate::solver::Algorithm;
use crate::util::{clog, query_param};

pub const DEFAULT_SOLVER_URL: &str = "https://pathfinder-visualizer-production.up.railway.app/solve";

/// Startup settings. Nothing here is persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub grid: GridSize,
    pub solver_url: String,
    /// Wall probability used by the "Random Walls" button.
    pub wall_probability: f64,
    /// Initial speed slider position, `0..=100`.
    pub default_speed: u32,
    pub default_algorithm: Algorithm,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            solver_url: DEFAULT_SOLVER_URL.to_string(),
            wall_probability: 0.28,
            default_speed: 50,
            default_algorithm: Algorithm::Bfs,
        }
    }
}

impl AppConfig {
    /// Applies `?solver=` and `?algorithm=` from a page query string.
    pub fn with_query(mut self, search: &str, decode: impl Fn(&str) -> String) -> Self {
        if let Some(raw) = query_param(search, "solver") {
            let url = decode(raw);
            if !url.is_empty() {
                self.solver_url = url;
            }
        }
        if let Some(alg) = query_param(search, "algorithm").and_then(Algorithm::from_key) {
            self.default_algorithm = alg;
        }
        self
    }

    /// Defaults overridden by the current page URL.
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let config = Self::default().with_query(&search, |raw| {
            js_sys::decode_uri_component(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string())
        });
        if config.solver_url != DEFAULT_SOLVER_URL {
            clog(&format!("solver endpoint overridden: {}", config.solver_url));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_overrides_solver_and_algorithm() {
        let cfg = AppConfig::default().with_query("?solver=http%3A%2F%2Flocal&algorithm=dijkstra", |raw| {
            raw.replace("%3A", ":").replace("%2F", "/")
        });
        assert_eq!(cfg.solver_url, "http://local");
        assert_eq!(cfg.default_algorithm, Algorithm::Dijkstra);
        assert_eq!(cfg.grid, GridSize { rows: 25, cols: 25 });
    }

    #[test]
    fn unknown_or_empty_values_keep_defaults() {
        let cfg = AppConfig::default().with_query("?solver=&algorithm=quantum", |raw| raw.to_string());
        assert_eq!(cfg, AppConfig::default());
    }
}
