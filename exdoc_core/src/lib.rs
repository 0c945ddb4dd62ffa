//! `exdoc_core` is the core library for the [exdoc](https://github.com/exdoc-rs/exdoc)
//! documentation refresher. It rewrites a markdown document in a single
//! forward pass, replacing the body of the tagged rust code block with the
//! current example source and replacing the output block under each
//! `» name args` directive with the captured output of running that example.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document
//!   → Document (whole-file load, trailing whitespace stripped per line)
//!   → LineCursor (forward traversal with splice-at-cursor edits)
//!   → Engine (recognizes the two trigger markers, deletes the stale run,
//!     splices in snippet lines or rendered example output)
//!   → Document write-back (whole file, newline-terminated lines)
//! ```
//!
//! ## Key Types
//!
//! - [`LineCursor`] — Traversal-and-edit structure over the document's lines.
//! - [`Document`] / [`SnippetSource`] — The rewritten file and the example
//!   source spliced into code blocks.
//! - [`ExampleRunner`] — Injected capability for running examples;
//!   [`CargoRunner`] is the real implementation.
//! - [`RewriteReport`] / [`CheckReport`] — Results of an update or check
//!   pass.
//! - [`ExdocConfig`] — Configuration loaded from `exdoc.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use exdoc_core::CargoRunner;
//! use exdoc_core::Document;
//! use exdoc_core::SnippetSource;
//! use exdoc_core::rewrite_document;
//! use exdoc_core::write_document;
//!
//! let document = Document::load(Path::new("README.md")).unwrap();
//! let snippet = SnippetSource::new("examples/send_mail.rs");
//! let runner = CargoRunner::new(".");
//!
//! let report = rewrite_document(&document, Some(&snippet), &runner).unwrap();
//! if report.lines != document.lines {
//! 	write_document(&document.path, &report.lines).unwrap();
//! }
//! ```

pub use config::*;
pub use cursor::*;
pub use engine::*;
pub use error::*;
pub use runner::*;

pub mod config;
mod cursor;
mod engine;
mod error;
mod runner;

#[cfg(test)]
mod __fixtures;
