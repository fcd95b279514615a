//! repowatch check-cycle engine.
//!
//! Sequences calls between the pure rules in the [`domain`] crate and the
//! infrastructure ports (source API, translator, senders, watermark store).
//! It contains no domain rules of its own.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** One logical thread of control: every fetch,
//! translation, send, and pacing delay is awaited in program order. No locks
//! are needed because nothing runs concurrently.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`cycle`] | `CycleRunner`, `Pacing`, `CycleReport` |
//! | [`translation`] | Fail-soft translation boundary |
//! | [`scheduler`] | Immediate-then-interval driver with shutdown |

pub mod cycle;
pub mod scheduler;
pub mod translation;

pub use cycle::{CycleReport, CycleRunner, Pacing};
pub use scheduler::Scheduler;
pub use translation::translate_fragment;
