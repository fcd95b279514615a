//! Shared value types for the check-cycle domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the fetched content itself. Issues and comments are immutable once fetched:
//! the engine never re-fetches an item to detect edits.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommentId, IssueId, IssueNumber};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly. Serialises as an RFC 3339 / ISO-8601 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string such as `2024-06-15T10:30:00Z`.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns this instant shifted back by `hours`.
    pub fn hours_before(self, hours: i64) -> Self {
        Self(self.0 - Duration::hours(hours))
    }

    /// Renders the instant the way the GitHub `since` parameter expects it
    /// (second precision, `Z` suffix).
    pub fn to_query_param(self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Fetched items
// ---------------------------------------------------------------------------

/// The account that created an issue or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// GitHub login handle.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// Open/closed state of an issue at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Display label used in notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

/// A GitHub issue as returned by the list-issues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub number: IssueNumber,
    pub title: String,
    /// `None` when the issue was opened without a description.
    pub body: Option<String>,
    pub state: IssueState,
    pub created_at: Timestamp,
    pub author: Author,
    /// Canonical browser URL.
    pub html_url: String,
    /// `true` when the list endpoint returned a pull request in issue form.
    pub is_pull_request: bool,
}

/// A comment posted on an issue (or pull request) conversation.
///
/// The parent issue is only referenced by its API URL; resolving its number
/// and title is a separate lookup (see [`crate::ItemSource::parent_issue`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub created_at: Timestamp,
    pub author: Author,
    /// Canonical browser URL of the comment anchor.
    pub html_url: String,
    /// API URL of the parent issue.
    pub issue_url: String,
}

impl Comment {
    /// Issue number parsed from the trailing path segment of [`Self::issue_url`].
    pub fn parent_number(&self) -> Option<IssueNumber> {
        self.issue_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .map(IssueNumber::new)
    }
}

/// The parent-issue details a comment notification needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentIssue {
    pub number: IssueNumber,
    pub title: String,
    pub html_url: String,
}

impl From<&Issue> for ParentIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            html_url: issue.html_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Outcome of translating one text fragment.
///
/// Translation failures never surface as errors past the translation boundary;
/// callers only ever see [`Translation::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Translation {
    Translated(String),
    #[default]
    Unavailable,
}

impl Translation {
    /// Returns the translated text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Unavailable => None,
        }
    }
}
