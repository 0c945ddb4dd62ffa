use std::path::Path;
use std::path::PathBuf;

use crate::ExampleRunner;
use crate::ExdocError;
use crate::ExdocResult;
use crate::LineCursor;
use crate::render_output;
use crate::split_directive;

/// Opening marker for the refreshed code block: a fence tagged with the rust
/// language label, matched against the trimmed line.
pub const CODE_FENCE_OPEN: &str = "```rust";

/// Any line starting with the bare fence closes a refreshed block.
pub const CODE_FENCE: &str = "```";

/// Prefix marking a run directive; the rest of the line is the command.
pub const RUN_DIRECTIVE_PREFIX: &str = "» ";

/// A markdown document loaded whole from disk. Trailing whitespace is
/// insignificant and stripped per line on load.
#[derive(Debug, Clone)]
pub struct Document {
	pub path: PathBuf,
	pub lines: Vec<String>,
}

impl Document {
	pub fn load(path: &Path) -> ExdocResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| ExdocError::DocumentRead {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;

		Ok(Self {
			path: path.to_path_buf(),
			lines: content.lines().map(|line| line.trim_end().to_string()).collect(),
		})
	}
}

/// The example source file spliced into the rust code block. Re-read on
/// every occurrence of the block marker, so a pass picks up edits made
/// between occurrences.
#[derive(Debug, Clone)]
pub struct SnippetSource {
	pub path: PathBuf,
}

impl SnippetSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Read the snippet verbatim, trailing whitespace stripped per line.
	pub fn read_lines(&self) -> ExdocResult<Vec<String>> {
		let content = std::fs::read_to_string(&self.path).map_err(|e| ExdocError::SnippetRead {
			path: self.path.display().to_string(),
			reason: e.to_string(),
		})?;

		Ok(content.lines().map(|line| line.trim_end().to_string()).collect())
	}
}

/// Result of one rewrite pass.
#[derive(Debug, Clone)]
pub struct RewriteReport {
	/// The document content after substitution.
	pub lines: Vec<String>,
	/// Number of code blocks refreshed from the snippet source.
	pub snippets: usize,
	/// Number of run directives executed.
	pub runs: usize,
}

/// Result of a check pass: the document as it is on disk against what a
/// rewrite would produce.
#[derive(Debug, Clone)]
pub struct CheckReport {
	pub current: Vec<String>,
	pub expected: Vec<String>,
	pub snippets: usize,
	pub runs: usize,
}

impl CheckReport {
	/// Returns `true` when a rewrite would leave the document unchanged.
	pub fn is_fresh(&self) -> bool {
		self.current == self.expected
	}
}

/// Perform the single forward substitution pass over `lines`.
///
/// Two triggers are recognized per iteration, checked in sequence against
/// whatever line the cursor holds at that point (deliberately not an
/// `if`/`else` pair — after the code-block handler advances past its closing
/// fence, the directive check runs against the line now under the cursor, so
/// a directive immediately following a code block is handled in the same
/// iteration):
///
/// 1. A line equal to `` ```rust `` (trimmed): advance past the fence,
///    splice in the snippet source, delete the stale body up to the closing
///    fence, advance past it.
/// 2. A line starting with `» `: take the rest as the command, advance past
///    the directive, delete the stale output up to the closing fence, run
///    the example and splice in its rendered output.
///
/// Each iteration ends with one unconditional advance.
pub fn rewrite_lines(
	lines: Vec<String>,
	snippet: Option<&SnippetSource>,
	runner: &dyn ExampleRunner,
) -> ExdocResult<RewriteReport> {
	let mut cursor = LineCursor::new(lines);
	let mut snippets = 0;
	let mut runs = 0;

	while !cursor.at_end() {
		if cursor.current().is_some_and(|line| line.trim() == CODE_FENCE_OPEN) {
			let snippet = snippet.ok_or(ExdocError::SnippetNotConfigured)?;
			tracing::debug!(path = %snippet.path.display(), "refreshing code block");
			cursor.advance();
			cursor.insert_before(snippet.read_lines()?);
			remove_until_fence(&mut cursor, CODE_FENCE_OPEN)?;
			cursor.advance();
			snippets += 1;
		}

		let command = cursor
			.current()
			.and_then(|line| line.strip_prefix(RUN_DIRECTIVE_PREFIX))
			.map(|rest| rest.trim().to_string());
		if let Some(command) = command {
			cursor.advance();
			remove_until_fence(&mut cursor, &format!("{RUN_DIRECTIVE_PREFIX}{command}"))?;
			let (example, args) = split_directive(&command);
			let output = runner.execute(example, args)?;
			cursor.insert_before(render_output(&output));
			runs += 1;
		}

		cursor.advance();
	}

	Ok(RewriteReport {
		lines: cursor.lines(),
		snippets,
		runs,
	})
}

/// Delete lines at the cursor until one starting with the closing fence is
/// under it. Running off the end of the document means the trigger's block
/// was never terminated.
fn remove_until_fence(cursor: &mut LineCursor, trigger: &str) -> ExdocResult<()> {
	loop {
		match cursor.current() {
			Some(line) if line.starts_with(CODE_FENCE) => return Ok(()),
			Some(_) => cursor.remove(),
			None => {
				return Err(ExdocError::MissingClosingFence {
					trigger: trigger.to_string(),
				});
			}
		}
	}
}

/// Rewrite a loaded document in memory.
pub fn rewrite_document(
	document: &Document,
	snippet: Option<&SnippetSource>,
	runner: &dyn ExampleRunner,
) -> ExdocResult<RewriteReport> {
	rewrite_lines(document.lines.clone(), snippet, runner)
}

/// Rewrite in memory and report whether the document on disk is stale.
pub fn check_document(
	document: &Document,
	snippet: Option<&SnippetSource>,
	runner: &dyn ExampleRunner,
) -> ExdocResult<CheckReport> {
	let report = rewrite_lines(document.lines.clone(), snippet, runner)?;

	Ok(CheckReport {
		current: document.lines.clone(),
		expected: report.lines,
		snippets: report.snippets,
		runs: report.runs,
	})
}

/// Write the final content back, one line per entry, newline-terminated.
/// This is the run's only write; every failure above it leaves the document
/// untouched on disk.
pub fn write_document(path: &Path, lines: &[String]) -> ExdocResult<()> {
	let mut content = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
	for line in lines {
		content.push_str(line);
		content.push('\n');
	}
	std::fs::write(path, content)?;
	Ok(())
}

/// A trigger found by [`scan_triggers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
	/// 1-indexed line number of the trigger line.
	pub line: usize,
	pub kind: TriggerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
	/// A `` ```rust `` code block refreshed from the snippet source.
	CodeBlock,
	/// A `» ` run directive with its command string.
	Run(String),
}

/// Enumerate the trigger lines of a document without rewriting anything.
pub fn scan_triggers(lines: &[String]) -> Vec<Trigger> {
	lines
		.iter()
		.enumerate()
		.filter_map(|(index, line)| {
			let kind = if line.trim() == CODE_FENCE_OPEN {
				Some(TriggerKind::CodeBlock)
			} else {
				line.strip_prefix(RUN_DIRECTIVE_PREFIX)
					.map(|rest| TriggerKind::Run(rest.trim().to_string()))
			};
			kind.map(|kind| Trigger {
				line: index + 1,
				kind,
			})
		})
		.collect()
}
