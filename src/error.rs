use thiserror::Error;

/// Failures while building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidSize { rows: u32, cols: u32 },
    #[error("a {rows}x{cols} grid cannot hold distinct start and goal markers")]
    MarkersDoNotFit { rows: u32, cols: u32 },
}

/// Failures of a solve round trip. `Display` is the text shown in the status line.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Fetch error: {0}")]
    Network(String),
    #[error("Server error: {body}")]
    Server { status: u16, body: String },
    #[error("Request error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Bad response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_surfaces_body_verbatim() {
        let err = SolveError::Server {
            status: 400,
            body: "{\"error\":\"Unknown algorithm\"}".into(),
        };
        assert_eq!(err.to_string(), "Server error: {\"error\":\"Unknown algorithm\"}");
    }

    #[test]
    fn network_error_matches_status_prefix() {
        let err = SolveError::Network("Failed to fetch".into());
        assert_eq!(err.to_string(), "Fetch error: Failed to fetch");
    }
}
