use std::{fmt, str::FromStr};

use crate::{Cli, Error, Result};

/// Returns the trimmed value of a required input, failing if it is absent or blank.
pub fn required(name: &'static str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => {
            tracing::error!("missing required input: {name}");
            Err(Error::MissingInput(name))
        }
    }
}

/// Returns the trimmed value of an optional input, treating blank as absent.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Repo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::InvalidInput {
                name: "repository",
                reason: format!("expected owner/name, got '{s}'"),
            }),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything a run needs, validated before any request is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub issue_id: u64,
    pub payload: String,
    pub marker: Option<String>,
    pub token: String,
    pub repo: Repo,
    pub api_url: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let issue_id = required("issue_id", cli.issue_id.as_deref())?;
        let issue_id = match issue_id.parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => {
                tracing::error!("issue_id is not an issue number: '{issue_id}'");
                return Err(Error::InvalidInput {
                    name: "issue_id",
                    reason: format!("'{issue_id}' is not an issue number"),
                });
            }
        };
        let payload = required("payload", cli.payload.as_deref())?;
        let marker = optional(cli.payload_marker.as_deref());
        tracing::debug!("payload marker: {marker:?}");
        let token = required("github_token", cli.github_token.as_deref())?;
        let repo: Repo = required("repository", cli.repository.as_deref())?.parse()?;

        Ok(Config {
            issue_id,
            payload,
            marker,
            token,
            repo,
            api_url: cli.api_url.trim_end_matches('/').to_string(),
        })
    }
}
