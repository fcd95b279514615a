//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging an
//! [`IssueNumber`] (the per-repository `#42`) with an [`IssueId`] (the global
//! database id GitHub also hands out) even though both are `u64` under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string newtype whose constructor trims the input and rejects
/// blank values.
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Returns `None` when `value` is empty after trimming.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let raw = value.into();
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Declares a `Copy` newtype over an integer id handed out by GitHub.
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The repository-scoped issue number shown in the UI (`#42`).
    IssueNumber
}

u64_id! {
    /// GitHub's global database id for an issue.
    IssueId
}

u64_id! {
    /// GitHub's global database id for an issue comment.
    CommentId
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single check cycle.
///
/// Generated fresh at the start of every cycle and attached to the cycle's
/// tracing span so all activity from one pass can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(Uuid);

impl CycleId {
    /// Generates a new random cycle identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (configuration)
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a monitored GitHub repository in `"owner/name"` format.
    ///
    /// Configured at startup and immutable for the lifetime of the process.
    /// Also used verbatim as the key of the persisted watermark file.
    RepositoryId
}

impl RepositoryId {
    /// Splits the identifier into `(owner, name)`.
    ///
    /// Returns `None` when the value is not of the form `owner/name`.
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        let (owner, name) = self.0.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            None
        } else {
            Some((owner, name))
        }
    }
}
