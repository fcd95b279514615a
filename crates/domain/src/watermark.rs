//! Per-repository progress tracking.
//!
//! A [`Watermark`] records, per category, the instant below which items are
//! considered already processed. The map is read once at cycle start and
//! written once at cycle end; the cycle holds the only mutable copy.
//!
//! ## Rules
//!
//! - A repository with no entry is bootstrapped to `cycle_start - 1h` for both
//!   categories, whether the whole state file is missing or only that entry.
//! - A category advances to `cycle_start` if and only if at least one
//!   qualifying item was found for it in the cycle. A cycle with no activity
//!   leaves the map untouched.
//! - A watermark never regresses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{RepositoryId, Timestamp};

/// How far back a newly seen repository looks on its first cycle.
pub const BOOTSTRAP_LOOKBACK_HOURS: i64 = 1;

/// The two independently tracked item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Issues,
    Comments,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issues => write!(f, "issues"),
            Self::Comments => write!(f, "comments"),
        }
    }
}

/// Last-processed instants for one repository.
///
/// Persisted as `{ "issues": "<rfc3339>", "comments": "<rfc3339>" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub issues: Timestamp,
    pub comments: Timestamp,
}

impl Watermark {
    /// Watermark for a repository seen for the first time in the cycle that
    /// started at `cycle_start`.
    pub fn bootstrap(cycle_start: Timestamp) -> Self {
        let since = cycle_start.hours_before(BOOTSTRAP_LOOKBACK_HOURS);
        Self {
            issues: since,
            comments: since,
        }
    }

    /// Returns the instant for `category`.
    pub fn get(&self, category: Category) -> Timestamp {
        match category {
            Category::Issues => self.issues,
            Category::Comments => self.comments,
        }
    }

    /// Advances `category` to `cycle_start` when `found` items qualified in it.
    ///
    /// Returns `true` when the watermark moved.
    pub fn advance(&mut self, category: Category, found: usize, cycle_start: Timestamp) -> bool {
        if found == 0 {
            return false;
        }
        let slot = match category {
            Category::Issues => &mut self.issues,
            Category::Comments => &mut self.comments,
        };
        if cycle_start > *slot {
            *slot = cycle_start;
            true
        } else {
            false
        }
    }
}

/// Watermarks for every known repository, keyed by [`RepositoryId`].
///
/// Serialises as a flat JSON object keyed by `"owner/name"`. Entries for
/// repositories that are no longer configured are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatermarkMap(BTreeMap<RepositoryId, Watermark>);

impl WatermarkMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesises a fresh map with every repository in `repos` bootstrapped.
    ///
    /// Used when no prior state can be loaded.
    pub fn bootstrap<'a>(
        repos: impl IntoIterator<Item = &'a RepositoryId>,
        cycle_start: Timestamp,
    ) -> Self {
        Self(
            repos
                .into_iter()
                .map(|repo| (repo.clone(), Watermark::bootstrap(cycle_start)))
                .collect(),
        )
    }

    /// Returns the watermark for `repo`, if one is recorded.
    pub fn get(&self, repo: &RepositoryId) -> Option<&Watermark> {
        self.0.get(repo)
    }

    /// Returns the watermark for `repo`, bootstrapping it on first use.
    pub fn entry_or_bootstrap(
        &mut self,
        repo: &RepositoryId,
        cycle_start: Timestamp,
    ) -> &mut Watermark {
        self.0
            .entry(repo.clone())
            .or_insert_with(|| Watermark::bootstrap(cycle_start))
    }

    /// Records `mark` for `repo`, returning the previous entry.
    pub fn insert(&mut self, repo: RepositoryId, mark: Watermark) -> Option<Watermark> {
        self.0.insert(repo, mark)
    }

    /// Number of repositories with a recorded watermark.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no repository has a recorded watermark.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in repository-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepositoryId, &Watermark)> {
        self.0.iter()
    }
}
