//! Wire shapes of the GitHub REST responses this crate reads.
//!
//! Only the fields the notifier uses are declared; serde ignores the rest.

use chrono::{DateTime, Utc};
use domain::{
    Author, Comment, CommentId, Issue, IssueId, IssueNumber, IssueState, ParentIssue, Timestamp,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum GitHubIssueState {
    Open,
    Closed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: GitHubIssueState,
    pub created_at: DateTime<Utc>,
    /// Deleted accounts come back as `null`.
    pub user: Option<GitHubUser>,
    pub html_url: String,
    /// Present (with links) only when the item is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: Option<GitHubUser>,
    pub html_url: String,
    pub issue_url: String,
}

fn author(user: Option<GitHubUser>) -> Author {
    match user {
        Some(user) => Author {
            login: user.login,
            avatar_url: user.avatar_url,
        },
        None => Author {
            login: "ghost".to_owned(),
            avatar_url: String::new(),
        },
    }
}

impl From<GitHubIssue> for Issue {
    fn from(raw: GitHubIssue) -> Self {
        Issue {
            id: IssueId::new(raw.id),
            number: IssueNumber::new(raw.number),
            title: raw.title,
            body: raw.body,
            state: match raw.state {
                GitHubIssueState::Open => IssueState::Open,
                GitHubIssueState::Closed => IssueState::Closed,
            },
            created_at: Timestamp::from_utc(raw.created_at),
            author: author(raw.user),
            html_url: raw.html_url,
            is_pull_request: raw.pull_request.is_some(),
        }
    }
}

impl From<GitHubIssue> for ParentIssue {
    fn from(raw: GitHubIssue) -> Self {
        ParentIssue {
            number: IssueNumber::new(raw.number),
            title: raw.title,
            html_url: raw.html_url,
        }
    }
}

impl From<GitHubComment> for Comment {
    fn from(raw: GitHubComment) -> Self {
        Comment {
            id: CommentId::new(raw.id),
            body: raw.body.unwrap_or_default(),
            created_at: Timestamp::from_utc(raw.created_at),
            author: author(raw.user),
            html_url: raw.html_url,
            issue_url: raw.issue_url,
        }
    }
}
