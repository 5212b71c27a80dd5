pub mod issues;

/// Client for the GitHub REST API.
///
/// Built once per run and passed by reference to every request.
#[derive(Clone)]
pub struct Github {
    pub host: String,
    pub token: String,
    client: reqwest::Client,
}

impl Github {
    pub fn new(host: String, token: String) -> Self {
        if token.is_empty() {
            tracing::error!("Failed to provide a GitHub token for accessing the REST API.");
        }
        Self {
            host,
            token,
            client: reqwest::Client::new(),
        }
    }
}
