use clap::Parser;

pub mod action;
pub mod error;
pub mod github;
pub mod inputs;
pub mod payload;
pub mod pipeline;

pub use error::{Error, Result, Stage};

/// Read a fenced JSON or YAML block out of a GitHub issue.
///
/// Every option falls back to the environment variable the Actions runner sets for it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of the issue to read.
    #[arg(long, env = "INPUT_ISSUE_ID")]
    pub issue_id: Option<String>,

    /// Payload format: json, yaml or yml.
    #[arg(long, env = "INPUT_PAYLOAD")]
    pub payload: Option<String>,

    /// Extra tag on the fence header selecting which block to read.
    #[arg(long, env = "INPUT_PAYLOAD_MARKER")]
    pub payload_marker: Option<String>,

    /// Token used to authenticate against the GitHub API.
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository owning the issue, as owner/name.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// File receiving step outputs.
    /// When absent, outputs are printed as workflow commands.
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<std::path::PathBuf>,
}

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from([
        "issue-payload",
        "--issue-id",
        "12",
        "--payload",
        "yaml",
        "--payload-marker",
        "meta",
        "--github-token",
        "token",
        "--repository",
        "octocat/hello-world",
        "--api-url",
        "http://localhost:1234",
    ])
    .unwrap();
    assert_eq!(cli.issue_id.as_deref(), Some("12"));
    assert_eq!(cli.payload.as_deref(), Some("yaml"));
    assert_eq!(cli.payload_marker.as_deref(), Some("meta"));
    assert_eq!(cli.github_token.as_deref(), Some("token"));
    assert_eq!(cli.repository.as_deref(), Some("octocat/hello-world"));
    assert_eq!(cli.api_url, "http://localhost:1234");
}
