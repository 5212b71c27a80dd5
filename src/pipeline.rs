use serde_json::Value;

use crate::github::Github;
use crate::inputs::Config;
use crate::payload::{self, Extraction};
use crate::Result;

/// How a run that did not hit an error ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Succeeded(Value),
    /// The issue body holds no block matching the requested payload.
    NoPayload { issue_id: u64 },
}

/// Fetches the configured issue and parses the payload block out of its body.
#[tracing::instrument(skip_all, fields(issue_id = config.issue_id, repo = %config.repo))]
pub async fn run(config: &Config, github: &Github) -> Result<Outcome> {
    tracing::debug!("payload type: '{}'", config.payload);
    let body = github
        .get_issue_body(&config.repo, config.issue_id)
        .await?;

    let text = match payload::extract(&config.payload, config.marker.as_deref(), &body)? {
        Extraction::Found(text) => text,
        Extraction::Miss => {
            let escaped = serde_json::Value::from(body.as_str()).to_string();
            tracing::error!("Failed to find parsable payload data in issue body: {escaped}");
            return Ok(Outcome::NoPayload {
                issue_id: config.issue_id,
            });
        }
    };

    let value = payload::parse(&config.payload, text)?;
    tracing::debug!("Matched and parsed data: '{value}'");
    Ok(Outcome::Succeeded(value))
}
