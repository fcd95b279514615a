//! In-memory fakes of every port, shared by the engine integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use domain::{
    select_new_comments, select_new_issues, Author, Category, Comment, CommentId,
    DeliveryError, Issue, IssueId, IssueNumber, IssueState, ItemSource, Notification,
    NotificationSender, ParentIssue, RepositoryId, SourceError, StoreError, Timestamp,
    TranslationError, Translator, WatermarkMap, WatermarkStore,
};

pub fn repo(name: &str) -> RepositoryId {
    RepositoryId::new(name).unwrap()
}

pub fn offset(base: Timestamp, seconds: i64) -> Timestamp {
    Timestamp::from_utc(base.as_datetime() + chrono::Duration::seconds(seconds))
}

fn author() -> Author {
    Author {
        login: "octocat".into(),
        avatar_url: "https://avatars.githubusercontent.com/u/583231".into(),
    }
}

pub fn issue(number: u64, created_at: Timestamp) -> Issue {
    Issue {
        id: IssueId::new(1000 + number),
        number: IssueNumber::new(number),
        title: format!("Issue {number}"),
        body: Some(format!("Body of issue {number}")),
        state: IssueState::Open,
        created_at,
        author: author(),
        html_url: format!("https://github.com/o/r/issues/{number}"),
        is_pull_request: false,
    }
}

pub fn pull_request(number: u64, created_at: Timestamp) -> Issue {
    Issue {
        is_pull_request: true,
        ..issue(number, created_at)
    }
}

pub fn comment(id: u64, parent: u64, created_at: Timestamp) -> Comment {
    Comment {
        id: CommentId::new(id),
        body: format!("Comment {id}"),
        created_at,
        author: author(),
        html_url: format!("https://github.com/o/r/issues/{parent}#issuecomment-{id}"),
        issue_url: format!("https://api.github.com/repos/o/r/issues/{parent}"),
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Serves canned items per repository and records every call.
///
/// Applies the same inclusion filters as the real GitHub source.
#[derive(Default)]
pub struct FakeSource {
    pub issues: HashMap<RepositoryId, Vec<Issue>>,
    pub comments: HashMap<RepositoryId, Vec<Comment>>,
    pub failing_issues: HashSet<RepositoryId>,
    pub failing_comments: HashSet<RepositoryId>,
    pub panicking: HashSet<RepositoryId>,
    pub failing_parents: bool,
    pub calls: Mutex<Vec<(RepositoryId, Category, Timestamp)>>,
}

impl FakeSource {
    pub fn calls(&self) -> Vec<(RepositoryId, Category, Timestamp)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemSource for FakeSource {
    async fn fetch_new_issues(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Issue>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((repo.clone(), Category::Issues, since));
        if self.panicking.contains(repo) {
            panic!("source exploded for {repo}");
        }
        if self.failing_issues.contains(repo) {
            return Err(SourceError::Status {
                status: 502,
                body: "bad gateway".into(),
            });
        }
        let all = self.issues.get(repo).cloned().unwrap_or_default();
        Ok(select_new_issues(all, since))
    }

    async fn fetch_new_comments(
        &self,
        repo: &RepositoryId,
        since: Timestamp,
    ) -> Result<Vec<Comment>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((repo.clone(), Category::Comments, since));
        if self.failing_comments.contains(repo) {
            return Err(SourceError::Transport("connection reset".into()));
        }
        let all = self.comments.get(repo).cloned().unwrap_or_default();
        Ok(select_new_comments(all, since))
    }

    async fn parent_issue(&self, comment: &Comment) -> Result<ParentIssue, SourceError> {
        if self.failing_parents {
            return Err(SourceError::Status {
                status: 404,
                body: "Not Found".into(),
            });
        }
        let number = comment.parent_number().unwrap_or(IssueNumber::new(0));
        Ok(ParentIssue {
            number,
            title: format!("Parent {number}"),
            html_url: format!("https://github.com/o/r/issues/{number}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Senders
// ---------------------------------------------------------------------------

/// Records every attempted notification; fails the attempts listed in
/// `fail_attempts` (1-based).
pub struct RecordingSender {
    name: &'static str,
    fail_attempts: HashSet<usize>,
    delay: Duration,
    attempts: AtomicUsize,
    pub attempted: Mutex<Vec<Notification>>,
    pub delivered: Mutex<Vec<Notification>>,
}

impl RecordingSender {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fail_attempts: HashSet::new(),
            delay: Duration::ZERO,
            attempts: AtomicUsize::new(0),
            attempted: Mutex::new(Vec::new()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, attempts: impl IntoIterator<Item = usize>) -> Self {
        self.fail_attempts = attempts.into_iter().collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn attempted(&self) -> Vec<Notification> {
        self.attempted.lock().unwrap().clone()
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        self.attempted.lock().unwrap().push(notification.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_attempts.contains(&attempt) {
            return Err(DeliveryError::Transport("simulated transport error".into()));
        }
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Prefixes every fragment with `tr:` and counts calls.
#[derive(Default)]
pub struct CountingTranslator {
    pub calls: AtomicUsize,
}

impl CountingTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for CountingTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("tr:{text}"))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub enum Initial {
    Missing,
    Malformed,
    Map(WatermarkMap),
}

pub struct MemoryStore {
    initial: Initial,
    pub loads: AtomicUsize,
    pub saved: Mutex<Vec<WatermarkMap>>,
}

impl MemoryStore {
    pub fn new(initial: Initial) -> Self {
        Self {
            initial,
            loads: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn last_saved(&self) -> Option<WatermarkMap> {
        self.saved.lock().unwrap().last().cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl WatermarkStore for MemoryStore {
    async fn load(&self) -> Result<WatermarkMap, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.initial {
            Initial::Missing => Err(StoreError::NotFound("memory".into())),
            Initial::Malformed => Err(StoreError::Malformed("expected value at line 1".into())),
            Initial::Map(map) => Ok(map.clone()),
        }
    }

    async fn save(&self, map: &WatermarkMap) -> Result<(), StoreError> {
        self.saved.lock().unwrap().push(map.clone());
        Ok(())
    }
}
