//! One check cycle: a single pass over every configured repository.
//!
//! ## Flow
//!
//! 1. Snapshot `now` as the cycle start and load the watermark map once.
//! 2. For each repository, strictly in configured order:
//!    fetch issues since the issue watermark and deliver each one to every
//!    sender; fetch comments since the comment watermark and deliver each one;
//!    advance each category iff it produced at least one item; pause for
//!    [`Pacing::between_repositories`].
//! 3. Persist the map once.
//!
//! Every network call and every pacing delay is an await point; nothing runs
//! concurrently. A fetch failure counts as an empty result, a delivery failure
//! is logged and skipped, and a panic inside one repository is contained at
//! the repository boundary so the remaining repositories still run.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use domain::{
    format_comment, format_issue, Category, Comment, CommentTranslations, CycleId, Issue,
    IssueTranslations, ItemSource, Notification, NotificationSender, RepositoryId, StoreError,
    Timestamp, Translator, Watermark, WatermarkMap, WatermarkStore,
};
use futures::FutureExt;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::translation::translate_fragment;

/// Fixed delays inserted between outbound calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Wait after every send attempt, successful or not.
    pub after_send: Duration,
    /// Wait after finishing one repository, before starting the next.
    pub between_repositories: Duration,
}

impl Pacing {
    /// Delays tuned for Discord webhook and GitHub anonymous rate limits.
    pub const fn standard() -> Self {
        Self {
            after_send: Duration::from_millis(1_000),
            between_repositories: Duration::from_millis(2_000),
        }
    }

    /// No delays at all.
    pub const fn none() -> Self {
        Self {
            after_send: Duration::ZERO,
            between_repositories: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle_id: CycleId,
    pub started_at: Timestamp,
    pub issues_found: usize,
    pub comments_found: usize,
    pub delivered: usize,
    pub failed_deliveries: usize,
    /// Repositories whose processing was abandoned by a panic.
    pub aborted_repositories: usize,
    /// Whether the watermark map was persisted.
    pub saved: bool,
}

#[derive(Debug, Default)]
struct RepositoryOutcome {
    issues: usize,
    comments: usize,
    delivered: usize,
    failed: usize,
}

/// Drives check cycles over a fixed repository list.
///
/// Holds only immutable configuration and shared handles to the ports; all
/// per-cycle state lives on the stack of [`CycleRunner::run_cycle`].
pub struct CycleRunner {
    repositories: Vec<RepositoryId>,
    source: Arc<dyn ItemSource>,
    store: Arc<dyn WatermarkStore>,
    translator: Option<Arc<dyn Translator>>,
    senders: Vec<Arc<dyn NotificationSender>>,
    pacing: Pacing,
}

impl CycleRunner {
    /// Creates a runner with no translator, no senders, and standard pacing.
    pub fn new(
        repositories: Vec<RepositoryId>,
        source: Arc<dyn ItemSource>,
        store: Arc<dyn WatermarkStore>,
    ) -> Self {
        Self {
            repositories,
            source,
            store,
            translator: None,
            senders: Vec::new(),
            pacing: Pacing::standard(),
        }
    }

    /// Enables translation of every text fragment.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Adds a destination. Senders are called in the order they were added.
    pub fn with_sender(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.senders.push(sender);
        self
    }

    /// Overrides the pacing delays.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The repositories this runner polls, in order.
    pub fn repositories(&self) -> &[RepositoryId] {
        &self.repositories
    }

    /// Runs one full cycle. Never fails; every problem is logged and reported.
    pub async fn run_cycle(&self) -> CycleReport {
        let cycle_id = CycleId::new_random();
        let span = info_span!("check_cycle", cycle = %cycle_id);
        self.run_cycle_inner(cycle_id).instrument(span).await
    }

    async fn run_cycle_inner(&self, cycle_id: CycleId) -> CycleReport {
        let started_at = Timestamp::now();
        info!(repositories = self.repositories.len(), "check cycle started");

        let mut marks = self.load_watermarks(started_at).await;
        let mut report = CycleReport {
            cycle_id,
            started_at,
            issues_found: 0,
            comments_found: 0,
            delivered: 0,
            failed_deliveries: 0,
            aborted_repositories: 0,
            saved: false,
        };

        for repo in &self.repositories {
            let since = *marks.entry_or_bootstrap(repo, started_at);
            let span = info_span!("repository", repo = %repo);
            let processed = AssertUnwindSafe(self.process_repository(repo, since).instrument(span))
                .catch_unwind()
                .await;

            match processed {
                Ok(outcome) => {
                    let mark = marks.entry_or_bootstrap(repo, started_at);
                    if mark.advance(Category::Issues, outcome.issues, started_at) {
                        debug!(repo = %repo, to = %started_at, "issue watermark advanced");
                    }
                    if mark.advance(Category::Comments, outcome.comments, started_at) {
                        debug!(repo = %repo, to = %started_at, "comment watermark advanced");
                    }
                    report.issues_found += outcome.issues;
                    report.comments_found += outcome.comments;
                    report.delivered += outcome.delivered;
                    report.failed_deliveries += outcome.failed;
                }
                Err(_) => {
                    error!(repo = %repo, "repository processing panicked; watermark left unchanged");
                    report.aborted_repositories += 1;
                }
            }

            self.pause(self.pacing.between_repositories).await;
        }

        match self.store.save(&marks).await {
            Ok(()) => report.saved = true,
            Err(error) => error!(%error, "failed to persist watermarks"),
        }

        info!(
            issues = report.issues_found,
            comments = report.comments_found,
            delivered = report.delivered,
            failed = report.failed_deliveries,
            "check cycle finished"
        );
        report
    }

    async fn load_watermarks(&self, started_at: Timestamp) -> WatermarkMap {
        match self.store.load().await {
            Ok(marks) => marks,
            Err(StoreError::NotFound(location)) => {
                info!(%location, "no watermark state yet; starting one hour back");
                WatermarkMap::bootstrap(&self.repositories, started_at)
            }
            Err(error) => {
                warn!(%error, "watermark state unreadable; starting one hour back");
                WatermarkMap::bootstrap(&self.repositories, started_at)
            }
        }
    }

    async fn process_repository(&self, repo: &RepositoryId, since: Watermark) -> RepositoryOutcome {
        let mut outcome = RepositoryOutcome::default();

        let issues = match self.source.fetch_new_issues(repo, since.issues).await {
            Ok(issues) => issues,
            Err(error) => {
                warn!(%error, since = %since.issues, "issue fetch failed; treating as empty");
                Vec::new()
            }
        };
        outcome.issues = issues.len();
        if !issues.is_empty() {
            info!(count = issues.len(), "new issues found");
        }
        for issue in &issues {
            let notification = self.issue_notification(repo, issue).await;
            self.deliver(&notification, &mut outcome).await;
        }

        let comments = match self.source.fetch_new_comments(repo, since.comments).await {
            Ok(comments) => comments,
            Err(error) => {
                warn!(%error, since = %since.comments, "comment fetch failed; treating as empty");
                Vec::new()
            }
        };
        outcome.comments = comments.len();
        if !comments.is_empty() {
            info!(count = comments.len(), "new comments found");
        }
        for comment in &comments {
            let notification = self.comment_notification(repo, comment).await;
            self.deliver(&notification, &mut outcome).await;
        }

        outcome
    }

    async fn issue_notification(&self, repo: &RepositoryId, issue: &Issue) -> Notification {
        let translator = self.translator.as_deref();
        let translations = IssueTranslations {
            title: translate_fragment(translator, Some(issue.title.as_str())).await,
            body: translate_fragment(translator, issue.body.as_deref()).await,
        };
        format_issue(repo, issue, &translations)
    }

    async fn comment_notification(&self, repo: &RepositoryId, comment: &Comment) -> Notification {
        let parent = match self.source.parent_issue(comment).await {
            Ok(parent) => Some(parent),
            Err(error) => {
                warn!(comment = %comment.id, %error, "parent issue lookup failed");
                None
            }
        };

        let translator = self.translator.as_deref();
        let translations = CommentTranslations {
            body: translate_fragment(translator, Some(comment.body.as_str())).await,
            parent_title: translate_fragment(translator, parent.as_ref().map(|p| p.title.as_str()))
                .await,
        };
        format_comment(repo, comment, parent.as_ref(), &translations)
    }

    async fn deliver(&self, notification: &Notification, outcome: &mut RepositoryOutcome) {
        for sender in &self.senders {
            match sender.send(notification).await {
                Ok(()) => {
                    info!(sender = sender.name(), title = %notification.title, "notification sent");
                    outcome.delivered += 1;
                }
                Err(error) => {
                    warn!(sender = sender.name(), title = %notification.title, %error, "notification delivery failed");
                    outcome.failed += 1;
                }
            }
            self.pause(self.pacing.after_send).await;
        }
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
