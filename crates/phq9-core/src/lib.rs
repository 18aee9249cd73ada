//! Core types and trait definitions for the PHQ-9 intake service.
//!
//! This crate has no HTTP, database or mail dependencies.
//! The store, mail and server crates all build on it.

// We intentionally use native `async fn` in traits.
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod answers;
pub mod error;
pub mod intake;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod store;
pub mod submission;

pub use error::{RenderError, SubmitError, ValidationError};
