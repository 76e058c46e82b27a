// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the proseloom continuation engine.
//!
//! Provides the error taxonomy, shared value types, and the static model
//! profile table used throughout the workspace.

pub mod error;
pub mod model;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ProseloomError;
pub use model::{ModelProfile, TokenWidth, MODEL_PROFILES};
pub use types::{ContextRequest, StoryMetadata, Tier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct() {
        let _config = ProseloomError::Config("test".into());
        let _auth = ProseloomError::Auth {
            status: 401,
            message: "test".into(),
        };
        let _quota = ProseloomError::Quota {
            status: 429,
            message: "test".into(),
        };
        let _unavailable = ProseloomError::ServiceUnavailable {
            status: 503,
            message: "test".into(),
        };
        let _empty = ProseloomError::EmptyResult("test".into());
        let _unexpected = ProseloomError::Unexpected {
            status: 418,
            message: "test".into(),
        };
        let _busy = ProseloomError::Busy;
    }

    #[test]
    fn error_messages_carry_status() {
        let err = ProseloomError::Auth {
            status: 401,
            message: "Invalid API key".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains("Invalid API key"));
    }
}
