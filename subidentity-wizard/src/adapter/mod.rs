//! Submission adapter abstraction.
//!
//! - Trait over the identity creation service
//! - Mock adapter for testing

pub mod mock;
pub mod traits;

pub use mock::{MockOutcome, MockSubmissionAdapter};
pub use traits::{AdapterError, SubmissionAdapter, SubmissionResult};
