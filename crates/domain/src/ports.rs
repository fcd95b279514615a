//! Port traits implemented by infrastructure crates.
//!
//! Every operation returns a `Result`; none of them decides what a failure
//! means for the cycle. The engine substitutes the fail-soft value (empty
//! list, [`crate::Translation::Unavailable`], skipped send) and logs.

use async_trait::async_trait;

use crate::{
    Comment, DeliveryError, Issue, Notification, ParentIssue, RepositoryId, SourceError,
    StoreError, Timestamp, TranslationError, WatermarkMap,
};

/// Reads candidate items from the source-control API.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Issues (not pull requests) created strictly after `since`.
    ///
    /// Implementations query by update time and must re-filter with
    /// [`crate::select_new_issues`] before returning.
    async fn fetch_new_issues(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Issue>, SourceError>;

    /// Issue comments created strictly after `since`.
    async fn fetch_new_comments(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Comment>, SourceError>;

    /// Resolves the issue a comment was posted on.
    async fn parent_issue(&self, comment: &Comment) -> Result<ParentIssue, SourceError>;
}

/// Machine translation of a single text fragment.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// Delivers one formatted notification to one destination.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Short destination name used in logs (e.g. `"discord"`).
    fn name(&self) -> &str;

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Persists the watermark map between cycles.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Reads the persisted map. [`StoreError::NotFound`] signals a first run.
    async fn load(&self) -> Result<WatermarkMap, StoreError>;

    /// Replaces the persisted map with `map`.
    async fn save(&self, map: &WatermarkMap) -> Result<(), StoreError>;
}
