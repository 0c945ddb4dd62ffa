use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ExdocError {
	#[error(transparent)]
	#[diagnostic(code(exdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read document `{path}`: {reason}")]
	#[diagnostic(
		code(exdoc::document_read),
		help("pass `--document` or set `document` in exdoc.toml to an existing markdown file")
	)]
	DocumentRead { path: String, reason: String },

	#[error("failed to read example source `{path}`: {reason}")]
	#[diagnostic(
		code(exdoc::snippet_read),
		help("pass `--snippet` or set `snippet` in exdoc.toml to an existing example file")
	)]
	SnippetRead { path: String, reason: String },

	#[error("document contains a ```rust block but no example source is configured")]
	#[diagnostic(
		code(exdoc::snippet_not_configured),
		help("add `snippet = \"examples/your_example.rs\"` to exdoc.toml or pass `--snippet`")
	)]
	SnippetNotConfigured,

	#[error("no closing ``` fence after `{trigger}`")]
	#[diagnostic(
		code(exdoc::missing_closing_fence),
		help("every refreshed block must be terminated by a line starting with ```")
	)]
	MissingClosingFence { trigger: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(exdoc::config_parse),
		help("check that exdoc.toml is valid TOML with `document` and `snippet` keys")
	)]
	ConfigParse(String),
}

pub type ExdocResult<T> = Result<T, ExdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
