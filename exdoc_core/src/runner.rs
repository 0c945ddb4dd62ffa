use std::path::PathBuf;
use std::process::Command;

use crate::ExdocResult;

/// Captured result of one example invocation: stdout and stderr are kept
/// separate, and `code` is the process exit code (`None` when the process
/// was terminated by a signal).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutput {
	pub stdout: String,
	pub stderr: String,
	pub code: Option<i32>,
}

impl ExecutionOutput {
	/// Returns `true` when the process exited with status zero.
	pub fn success(&self) -> bool {
		self.code == Some(0)
	}
}

/// Capability for building and running a named example program.
///
/// The engine only ever talks to this trait, so tests substitute a scripted
/// fake and never touch the real build tool. A non-zero exit is captured in
/// the returned [`ExecutionOutput`], not treated as an error; only a failure
/// to launch the tool at all propagates.
pub trait ExampleRunner {
	fn execute(&self, example: &str, args: &str) -> ExdocResult<ExecutionOutput>;
}

/// Runs examples through `cargo run -q --example=<name> -- <args>` in the
/// project root, via the platform shell so the argument string passes
/// through unmodified.
#[derive(Debug, Clone)]
pub struct CargoRunner {
	root: PathBuf,
}

impl CargoRunner {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl ExampleRunner for CargoRunner {
	fn execute(&self, example: &str, args: &str) -> ExdocResult<ExecutionOutput> {
		let command = format!("cargo run -q --example={example} -- {args}");
		tracing::debug!(%command, "running example");

		let output = if cfg!(windows) {
			Command::new("cmd")
				.arg("/C")
				.arg(&command)
				.current_dir(&self.root)
				.output()?
		} else {
			Command::new("sh")
				.arg("-c")
				.arg(&command)
				.current_dir(&self.root)
				.output()?
		};

		Ok(ExecutionOutput {
			stdout: String::from_utf8_lossy(&output.stdout).to_string(),
			stderr: String::from_utf8_lossy(&output.stderr).to_string(),
			code: output.status.code(),
		})
	}
}

/// Split a directive command string into the example name and its argument
/// string. The split happens at the first whitespace run only; everything
/// after it is a single opaque argument string.
pub fn split_directive(command: &str) -> (&str, &str) {
	match command.split_once(char::is_whitespace) {
		Some((example, args)) => (example, args.trim_start()),
		None => (command, ""),
	}
}

/// Render a captured execution result as the lines of an output block.
///
/// Non-empty stdout and stderr each get a labeled section header followed by
/// their lines; a non-zero exit appends a trailing status line. When all
/// three are empty/zero the block is empty.
pub fn render_output(output: &ExecutionOutput) -> Vec<String> {
	let mut lines = Vec::new();

	if !output.stdout.is_empty() {
		lines.push("-- stdout --".to_string());
		lines.extend(output.stdout.lines().map(str::to_string));
	}
	if !output.stderr.is_empty() {
		lines.push("-- stderr --".to_string());
		lines.extend(output.stderr.lines().map(str::to_string));
	}
	if !output.success() {
		let code = output
			.code
			.map_or_else(|| "unknown".to_string(), |code| code.to_string());
		lines.push(format!("-- exit status {code}"));
	}

	lines
}
