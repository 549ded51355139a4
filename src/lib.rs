// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-audit - WCAG Accessibility Audit Engine
//!
//! Evaluates a document tree against a catalog of independent inspection
//! routines ("checks") and produces a structured, scored audit report.
//!
//! ## Architecture
//!
//! - `engine`: the load-bearing core - rule registry, configuration
//!   merging, the sequential scheduler, the session report store, and the
//!   summary/score aggregator.
//! - `checks`: the check contract plus the built-in WCAG rule catalog.
//! - `dom`: the opaque DOM-provider seam and a static-HTML implementation
//!   backed by `scraper`.
//! - `locale`: locale-aware message formatting with HTML-escaped
//!   interpolation.
//! - `report`: the immutable audit report and its output formats.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use a11y_audit::checks;
//! use a11y_audit::dom::HtmlDocument;
//! use a11y_audit::engine::{self, AuditContext, AuditSession, RunConfig};
//! use a11y_audit::locale::MessageCatalog;
//!
//! let registry = checks::builtin_registry()?;
//! let standards = checks::builtin_standards();
//! let doc = HtmlDocument::parse(html);
//! let ctx = AuditContext::document(&doc, "index.html");
//! let mut session = AuditSession::new();
//! let report = engine::run(
//!     &registry, &RunConfig::new(), &standards,
//!     &MessageCatalog::english(), &ctx, &mut session,
//! ).await?;
//! println!("score: {}", report.score);
//! ```
//!
//! One audit run executes on a single logical thread of control; checks
//! run strictly sequentially. Concurrent audits need independent sessions.

pub mod checks;
pub mod dom;
pub mod engine;
pub mod error;
pub mod locale;
pub mod model;
pub mod report;

pub use engine::{AuditContext, AuditSession, RunConfig, StandardsTable};
pub use error::{AuditError, Result};
pub use model::{CategoryType, ExecutionStatus, Issue, Severity, SkipReason};
pub use report::{AuditReport, OutputFormat};
