use std::cell::RefCell;
use std::collections::VecDeque;

use crate::ExampleRunner;
use crate::ExdocResult;
use crate::ExecutionOutput;

/// Scripted runner for engine tests: hands out canned outputs in order and
/// records every invocation. Once the script is exhausted it returns an
/// empty success.
#[derive(Debug, Default)]
pub struct FakeRunner {
	outputs: RefCell<VecDeque<ExecutionOutput>>,
	pub calls: RefCell<Vec<(String, String)>>,
}

impl FakeRunner {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_output(self, output: ExecutionOutput) -> Self {
		self.outputs.borrow_mut().push_back(output);
		self
	}
}

impl ExampleRunner for FakeRunner {
	fn execute(&self, example: &str, args: &str) -> ExdocResult<ExecutionOutput> {
		self.calls
			.borrow_mut()
			.push((example.to_string(), args.to_string()));
		Ok(self.outputs.borrow_mut().pop_front().unwrap_or_else(|| {
			ExecutionOutput {
				code: Some(0),
				..ExecutionOutput::default()
			}
		}))
	}
}

/// Build an output with stdout text and a zero exit.
pub fn stdout_output(stdout: &str) -> ExecutionOutput {
	ExecutionOutput {
		stdout: stdout.to_string(),
		stderr: String::new(),
		code: Some(0),
	}
}

/// Build an output with stderr text and the given exit code.
pub fn stderr_output(stderr: &str, code: i32) -> ExecutionOutput {
	ExecutionOutput {
		stdout: String::new(),
		stderr: stderr.to_string(),
		code: Some(code),
	}
}

/// Owned lines from a slice of literals.
pub fn lines(raw: &[&str]) -> Vec<String> {
	raw.iter().map(|line| (*line).to_string()).collect()
}
