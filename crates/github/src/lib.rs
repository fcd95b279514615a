//! repowatch GitHub infrastructure adapter.
//!
//! Implements [`domain::ItemSource`] against the GitHub REST API (v3) with a
//! plain [`reqwest::Client`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. It queries
//! by update time (the only `since` filter GitHub offers) and hands the raw
//! page to [`domain::select_new_issues`] / [`domain::select_new_comments`],
//! which apply the creation-time and pull-request rules.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | new issues | `GET /repos/{owner}/{name}/issues?state=all&sort=updated&direction=desc&per_page=50&since=…` |
//! | new comments | `GET /repos/{owner}/{name}/issues/comments?sort=created&direction=desc&per_page=50&since=…` |
//! | parent issue | `GET {comment.issue_url}` |
//!
//! A token is optional. Without one GitHub applies the anonymous rate limit
//! (60 requests per hour per IP).

mod models;

use async_trait::async_trait;
use domain::{
    select_new_comments, select_new_issues, Comment, Issue, ItemSource, ParentIssue,
    RepositoryId, SourceError, Timestamp, PAGE_SIZE,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{GitHubComment, GitHubIssue};

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("repowatch/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Reads issues and issue comments from GitHub.
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubSource {
    /// Creates a source for the public API. `token` is sent as a bearer
    /// credential when present.
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: DEFAULT_API_BASE.to_owned(),
            token,
        }
    }

    /// Points the source at another API root (GitHub Enterprise, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn repo_url(&self, repo: &RepositoryId, suffix: &str) -> Result<String, SourceError> {
        let (owner, name) = repo
            .owner_and_name()
            .ok_or_else(|| SourceError::InvalidRepository(repo.to_string()))?;
        Ok(format!("{}/repos/{}/{}/{}", self.base_url, owner, name, suffix))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let mut request = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }

    fn list_query(since: Timestamp, sort: &str) -> Vec<(&'static str, String)> {
        vec![
            ("sort", sort.to_owned()),
            ("direction", "desc".to_owned()),
            ("per_page", PAGE_SIZE.to_string()),
            ("since", since.to_query_param()),
        ]
    }
}

#[async_trait]
impl ItemSource for GitHubSource {
    async fn fetch_new_issues(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Issue>, SourceError> {
        let url = self.repo_url(repo, "issues")?;
        let mut query = Self::list_query(since, "updated");
        query.push(("state", "all".to_owned()));

        let page: Vec<GitHubIssue> = self.get_json(&url, &query).await?;
        let fetched = page.len();
        let issues = select_new_issues(page.into_iter().map(Issue::from).collect(), since);
        debug!(repo = %repo, %since, fetched, selected = issues.len(), "issues listed");
        Ok(issues)
    }

    async fn fetch_new_comments(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Comment>, SourceError> {
        let url = self.repo_url(repo, "issues/comments")?;
        let query = Self::list_query(since, "created");

        let page: Vec<GitHubComment> = self.get_json(&url, &query).await?;
        let fetched = page.len();
        let comments = select_new_comments(page.into_iter().map(Comment::from).collect(), since);
        debug!(repo = %repo, %since, fetched, selected = comments.len(), "comments listed");
        Ok(comments)
    }

    async fn parent_issue(&self, comment: &Comment) -> Result<ParentIssue, SourceError> {
        let raw: GitHubIssue = self.get_json(&comment.issue_url, &[]).await?;
        Ok(ParentIssue::from(raw))
    }
}
