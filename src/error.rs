use std::fmt;

use thiserror::Error;

/// Stage of a run, in the order the pipeline visits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    FetchingBody,
    Extracting,
    Parsing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configuration => "Configuration",
            Stage::FetchingBody => "Fetching issue",
            Stage::Extracting => "Extracting payload",
            Stage::Parsing => "Parsing payload",
        };
        f.write_str(name)
    }
}

/// Why the content of a fenced block could not be turned into a value.
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("Unsupported Payload type: {0}.")]
    Unsupported(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    /// A required input was absent or blank.
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Invalid value for input {name}: {reason}")]
    InvalidInput { name: &'static str, reason: String },

    /// The API answered with anything but 200.
    #[error("Unexpected status code from retrieving issue: {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to load issue {issue_id}: {source}")]
    Transport {
        issue_id: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build payload pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to parse data payload as {payload}: {source}")]
    Parse {
        payload: String,
        #[source]
        source: ParseFailure,
    },
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::MissingInput(_) | Error::InvalidInput { .. } => Stage::Configuration,
            Error::UnexpectedStatus(_) | Error::Transport { .. } => Stage::FetchingBody,
            Error::Pattern(_) => Stage::Extracting,
            Error::Parse { .. } => Stage::Parsing,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[test]
fn test_stage() {
    assert_eq!(Error::MissingInput("payload").stage(), Stage::Configuration);
    assert_eq!(Error::UnexpectedStatus(404).stage(), Stage::FetchingBody);
    assert_eq!(
        Error::Parse {
            payload: "toml".into(),
            source: ParseFailure::Unsupported("toml".into()),
        }
        .stage(),
        Stage::Parsing
    );
    assert_eq!(Stage::FetchingBody.to_string(), "Fetching issue");
}
