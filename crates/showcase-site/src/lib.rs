//! Showcase Site
//!
//! Everything on the site that is not a puzzle demo.
//!
//! # Architecture
//!
//! - **Content**: static profile table ([`content::SITE`])
//! - **Storage**: per-client key/value store backed by a JSON file
//! - **Challenge**: hidden switch, impossible button and the flag checker
//! - **Checklist**: assessment checklist with inline widgets
//! - **Snippet**: highlighted code box with a real fetch behind it

pub mod challenge;
pub mod checklist;
pub mod content;
pub mod error;
pub mod highlight;
pub mod models;
pub mod snippet;
pub mod storage;

pub use challenge::{derive_id, Challenge, ChallengeStatus, Verdict};
pub use content::{Content, SITE};
pub use error::{Error, Result};
pub use snippet::{SnippetRunner, SnippetState};
pub use storage::Storage;
