use super::Github;
use crate::inputs::Repo;
use crate::{Error, Result};
use serde::Deserialize;
use tracing;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct User {
    pub login: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    // null when the issue was opened without a description
    pub body: Option<String>,
    pub user: Option<User>,
}

impl Github {
    pub async fn get_issue(&self, repo: &Repo, issue_id: u64) -> Result<Issue> {
        let url = format!(
            "{}/repos/{}/{}/issues/{issue_id}",
            self.host, repo.owner, repo.name
        );
        let transport = move |source: reqwest::Error| Error::Transport { issue_id, source };

        let req = self
            .client
            .request(reqwest::Method::GET, &url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, env!("CARGO_PKG_NAME"))
            .build()
            .map_err(|err| {
                tracing::error!("failed to build request for issue {issue_id}: {err}");
                transport(err)
            })?;
        tracing::debug!("sending request: {} {}", req.method(), req.url());

        let resp = self.client.execute(req).await.map_err(|err| {
            tracing::error!("request for issue {issue_id} failed: {err}");
            transport(err)
        })?;
        tracing::trace!("got response: {resp:?}");

        if resp.status() != reqwest::StatusCode::OK {
            let status = resp.status().as_u16();
            tracing::error!("Unexpected status code from retrieving issue: {status}");
            return Err(Error::UnexpectedStatus(status));
        }

        let issue: Issue = resp.json().await.map_err(|err| {
            tracing::error!("failed to decode issue {issue_id}: {err}");
            transport(err)
        })?;
        tracing::trace!("parsed response: {issue:#?}");
        Ok(issue)
    }

    /// Fetches the issue and returns its description, empty if it has none.
    #[tracing::instrument(skip(self))]
    pub async fn get_issue_body(&self, repo: &Repo, issue_id: u64) -> Result<String> {
        let issue = self.get_issue(repo, issue_id).await?;
        Ok(issue.body.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Stage;
    use mockito::Server;

    fn repo() -> Repo {
        Repo {
            owner: "octocat".into(),
            name: "Hello-World".into(),
        }
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/octocat/Hello-World/issues/1347")
            .match_header("authorization", "Bearer token")
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(std::fs::read_to_string("testdata/issue.json").unwrap())
            .create_async()
            .await;

        let github = Github::new(server.url(), "token".to_string());
        let issue = github.get_issue(&repo(), 1347).await.unwrap();

        assert_eq!(
            issue,
            Issue {
                number: 1347,
                title: "Deploy request".into(),
                body: Some(
                    "Please deploy the following:\r\n\r\n```json release\r\n{\"version\": \"1.2.0\", \"targets\": [\"eu\", \"us\"]}\r\n```\r\n".into()
                ),
                user: Some(User {
                    login: "octocat".into()
                }),
            }
        );
        mock.assert_async().await;
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_body_null() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/repos/octocat/Hello-World/issues/7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 7, "title": "empty", "body": null, "user": null}"#)
            .create_async()
            .await;

        let github = Github::new(server.url(), "token".to_string());
        let body = github.get_issue_body(&repo(), 7).await.unwrap();
        assert_eq!(body, "");
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_not_found() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/repos/octocat/Hello-World/issues/9")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let github = Github::new(server.url(), "token".to_string());
        let err = github.get_issue_body(&repo(), 9).await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus(404)));
        assert_eq!(
            err.to_string(),
            "Unexpected status code from retrieving issue: 404"
        );
        assert!(logs_contain("Unexpected status code from retrieving issue: 404"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_other_success_status() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/repos/octocat/Hello-World/issues/9")
            .with_status(203)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 9, "title": "t", "body": "b"}"#)
            .create_async()
            .await;

        let github = Github::new(server.url(), "token".to_string());
        let err = github.get_issue_body(&repo(), 9).await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus(203)));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_malformed_response() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/repos/octocat/Hello-World/issues/3")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let github = Github::new(server.url(), "token".to_string());
        let err = github.get_issue_body(&repo(), 3).await.unwrap_err();
        assert!(matches!(err, Error::Transport { issue_id: 3, .. }));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_unreachable() {
        // nothing listens on port 1
        let github = Github::new("http://127.0.0.1:1".to_string(), "token".to_string());
        let err = github.get_issue_body(&repo(), 1).await.unwrap_err();
        assert!(matches!(err, Error::Transport { issue_id: 1, .. }));
        assert_eq!(err.stage(), Stage::FetchingBody);
        assert!(logs_contain("request for issue 1 failed"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_issue_bad_host() {
        let github = Github::new("not a url".to_string(), "token".to_string());
        let err = github.get_issue_body(&repo(), 1).await.unwrap_err();
        assert!(matches!(err, Error::Transport { issue_id: 1, .. }));
        assert!(logs_contain("failed to build request for issue 1"));
    }
}
