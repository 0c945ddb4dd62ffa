use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	version,
	about = "Keep the example code and example output in your readme fresh.",
	long_about = "exdoc rewrites a markdown document in place, splicing the current example \
	              source into the tagged rust code block and the captured output of running \
	              each `» name args` directive into the block below it.\n\nQuick start:\n  \
	              exdoc init    Create a config file\n  exdoc update  Rewrite the document\n  \
	              exdoc check   Verify the document is up to date\n  exdoc list    Show the \
	              trigger lines found in the document\n\nRunning `exdoc` with no subcommand \
	              behaves like `exdoc update`."
)]
pub struct ExdocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Path to the markdown document, overriding the config file.
	#[arg(long, global = true)]
	pub document: Option<PathBuf>,

	/// Path to the example source spliced into the rust code block,
	/// overriding the config file.
	#[arg(long, global = true)]
	pub snippet: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize exdoc in a project by creating a sample config file.
	///
	/// Creates an `exdoc.toml` in the project root with the document and
	/// snippet settings commented for editing. If the file already exists,
	/// this command is a no-op and exits successfully.
	Init,
	/// Check that the document is up to date.
	///
	/// Performs the rewrite in memory — including running every `» ` example
	/// directive — and compares the result against the document on disk.
	/// Exits with a non-zero status code when the document is stale, which
	/// makes this the CI guard against drifting example output.
	Check {
		/// Show a unified diff between the document on disk and the content
		/// a rewrite would produce.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,

		/// Watch for file changes and re-run checks automatically.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// Rewrite the document in place with fresh example content.
	///
	/// Splices the example source file into the tagged rust code block and
	/// the captured output of each example run into its directive block,
	/// then writes the whole document back. The write only happens after
	/// the entire pass succeeds, so a failure leaves the document untouched.
	///
	/// Use `--dry-run` to see what would change without writing, or
	/// `--watch` to re-run whenever files in the project change.
	Update {
		/// Report what would change without writing the document.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Watch for file changes and re-run updates automatically.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// List the trigger lines found in the document.
	///
	/// Shows every tagged rust code block and every `» ` directive with its
	/// line number and command, without rewriting anything.
	List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
