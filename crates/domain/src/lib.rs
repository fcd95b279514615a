//! Check-cycle domain for repowatch.
//!
//! This crate contains every domain concept used by the poller: identifiers,
//! fetched item types, the watermark rules, the fetch inclusion filters, the
//! notification formatter, and the port traits that infrastructure crates
//! implement. Infrastructure crates never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryId`, `IssueNumber`, `CycleId`, etc.) |
//! | [`types`] | `Timestamp`, `Issue`, `Comment`, `Translation` |
//! | [`watermark`] | Per-repository progress map and its advance rule |
//! | [`filter`] | Strict creation-time and pull-request filters |
//! | [`notification`] | Pure notification formatter and truncation policy |
//! | [`ports`] | `ItemSource`, `Translator`, `NotificationSender`, `WatermarkStore` |
//! | [`errors`] | Error taxonomy |

pub mod errors;
pub mod filter;
pub mod identifiers;
pub mod notification;
pub mod ports;
pub mod types;
pub mod watermark;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ConfigurationError, DeliveryError, SourceError, StoreError, TranslationError};
pub use filter::{select_new_comments, select_new_issues, PAGE_SIZE};
pub use identifiers::{CommentId, CycleId, IssueId, IssueNumber, RepositoryId};
pub use notification::{
    format_comment, format_issue, truncate, Accent, CommentTranslations, Field,
    IssueTranslations, Notification,
};
pub use ports::{ItemSource, NotificationSender, Translator, WatermarkStore};
pub use types::{Author, Comment, Issue, IssueState, ParentIssue, Timestamp, Translation};
pub use watermark::{Category, Watermark, WatermarkMap};
