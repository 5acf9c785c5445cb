//! Mention autocompletion engine.
//!
//! Watches keystrokes on a [`TextModel`](atmark_surface::TextModel), derives
//! the trigger session from scratch on every change, runs candidates through
//! middleware, scoring, and truncation, and renders the survivors through a
//! [`SuggestionView`](view::SuggestionView). Accepting a suggestion splices
//! it back into the text model at the trigger position.
//!
//! Everything runs synchronously inside one event-handler invocation except
//! the candidate supplier, which is debounced and awaited cooperatively.

pub mod config;
pub mod controller;
pub mod fetch;
pub mod pipeline;
pub mod trigger;
pub mod view;

pub use atmark_score::{Candidate, match_score, rank};
pub use config::{MentionConfig, MiddlewareFailure};
pub use controller::Mentions;
pub use fetch::{CandidateSupplier, SupplierError};
pub use pipeline::{Middleware, MiddlewareError};
pub use trigger::TriggerState;
pub use view::{Anchor, SuggestionView};
