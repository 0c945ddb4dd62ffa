use std::collections::VecDeque;

/// A traversal-and-edit structure over an ordered sequence of lines.
///
/// The cursor splits the document into three parts: `before` holds lines
/// already visited, `current` is the line under the cursor (or `None` once
/// traversal has run off the end), and `after` holds lines not yet visited.
/// Concatenating `before ++ [current] ++ after` always yields the full
/// document, so edits at the cursor never shift positions elsewhere.
///
/// Traversal is forward-only: [`advance`](Self::advance) finalizes the
/// current line into `before` and loads the next one, while
/// [`insert_before`](Self::insert_before), [`insert_after`](Self::insert_after)
/// and [`remove`](Self::remove) splice at the cursor in constant time. This
/// is what lets the engine delete a variable-length run of stale lines and
/// splice in a variable-length replacement without recomputing indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCursor {
	before: Vec<String>,
	current: Option<String>,
	after: VecDeque<String>,
}

impl LineCursor {
	/// Create a cursor over `lines`, positioned at the first line. Trailing
	/// whitespace is stripped from every line on the way in.
	pub fn new<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut cursor = Self {
			before: Vec::new(),
			current: None,
			after: lines
				.into_iter()
				.map(|line| line.as_ref().trim_end().to_string())
				.collect(),
		};
		cursor.advance();
		cursor
	}

	/// The line under the cursor, or `None` once traversal is complete.
	pub fn current(&self) -> Option<&str> {
		self.current.as_deref()
	}

	/// Returns `true` when the cursor has run off the end of the sequence.
	pub fn at_end(&self) -> bool {
		self.current.is_none()
	}

	/// Finalize the current line (if any) into `before` and load the next
	/// line from `after`. At the end of the sequence this is a no-op that
	/// leaves `current` absent, so calling it repeatedly is always safe.
	pub fn advance(&mut self) {
		if let Some(line) = self.current.take() {
			self.before.push(line);
		}
		self.current = self.after.pop_front();
	}

	/// Splice `lines` immediately after the cursor, in order. The current
	/// line and everything before it are untouched; the cursor does not
	/// move.
	pub fn insert_after<I>(&mut self, lines: I)
	where
		I: IntoIterator<Item = String>,
	{
		let lines: Vec<String> = lines.into_iter().collect();
		for line in lines.into_iter().rev() {
			self.after.push_front(line);
		}
	}

	/// Splice `lines` immediately before the cursor, in order. The current
	/// line and everything after it are untouched.
	pub fn insert_before<I>(&mut self, lines: I)
	where
		I: IntoIterator<Item = String>,
	{
		self.before.extend(lines);
	}

	/// Delete the line under the cursor and move to the next one.
	pub fn remove(&mut self) {
		self.current = None;
		self.advance();
	}

	/// Restart traversal from the beginning over the current content,
	/// keeping every edit made so far.
	pub fn rewind(&mut self) {
		let all = self.lines();
		self.before = Vec::new();
		self.current = None;
		self.after = all.into();
		self.advance();
	}

	/// Materialize the full content as `before ++ [current] ++ after`.
	pub fn lines(&self) -> Vec<String> {
		let mut all =
			Vec::with_capacity(self.before.len() + usize::from(self.current.is_some()) + self.after.len());
		all.extend(self.before.iter().cloned());
		all.extend(self.current.iter().cloned());
		all.extend(self.after.iter().cloned());
		all
	}
}
