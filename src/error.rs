// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the audit engine.
//!
//! Only setup problems surface here: a duplicate rule id at registration
//! time, a configuration override naming a rule that was never registered,
//! or a malformed selector in a descriptor. Anything that goes wrong inside
//! an individual check during a run is captured as that rule's
//! [`ExecutionStatus`](crate::model::ExecutionStatus) and never aborts the
//! audit.

use crate::dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("configuration override references unknown rule id: {0}")]
    UnknownRuleId(String),

    #[error("malformed selector on rule '{rule}': {source}")]
    Selector {
        rule: String,
        #[source]
        source: DomError,
    },

    #[error("DOM provider error: {0}")]
    Dom(#[from] DomError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
