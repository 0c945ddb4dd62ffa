use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use exdoc_cli::Commands;
use exdoc_cli::ExdocCli;
use exdoc_cli::OutputFormat;
use exdoc_core::AnyEmptyResult;
use exdoc_core::AnyResult;
use exdoc_core::CargoRunner;
use exdoc_core::Document;
use exdoc_core::ExdocConfig;
use exdoc_core::SnippetSource;
use exdoc_core::TriggerKind;
use exdoc_core::check_document;
use exdoc_core::rewrite_document;
use exdoc_core::scan_triggers;
use exdoc_core::write_document;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ExdocCli::parse();

	// Respect NO_COLOR, --no-color, and non-terminal stdout.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		tracing_subscriber::EnvFilter::new(if args.verbose { "debug" } else { "warn" })
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Check {
			diff,
			format,
			watch,
		}) => run_check(&args, diff, format, watch),
		Some(Commands::Update { dry_run, watch }) => run_update(&args, dry_run, watch),
		Some(Commands::List) => run_list(&args),
		// Bare `exdoc` rewrites the document, the tool's one core behavior.
		None => run_update(&args, false, false),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<exdoc_core::ExdocError>() {
			Ok(exdoc_err) => {
				let report: miette::Report = (*exdoc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &ExdocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolved per-run paths: project root, document path, optional snippet
/// source. CLI flags override the config file, which overrides defaults.
fn resolve_paths(args: &ExdocCli) -> AnyResult<(PathBuf, PathBuf, Option<SnippetSource>)> {
	let root = resolve_root(args);
	let config = ExdocConfig::load(&root)?;

	let document = root.join(args.document.clone().unwrap_or(config.document));
	let snippet = args
		.snippet
		.clone()
		.or(config.snippet)
		.map(|path| SnippetSource::new(root.join(path)));

	Ok((root, document, snippet))
}

fn run_init(args: &ExdocCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config_path = root.join("exdoc.toml");

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
		return Ok(());
	}

	let sample_config = "# exdoc configuration\n\n# The markdown document rewritten in \
	                     place.\ndocument = \"README.md\"\n\n# The example source file spliced \
	                     into the ```rust code block.\n# snippet = \"examples/demo.rs\"\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created exdoc.toml");
	println!();
	println!("Next steps:");
	println!("  1. Point `document` and `snippet` at your files");
	println!("  2. Run `exdoc update` to refresh the document");
	println!("  3. Run `exdoc check` in CI to catch drift");

	Ok(())
}

fn run_check(args: &ExdocCli, show_diff: bool, format: OutputFormat, watch: bool) -> AnyEmptyResult {
	// Run the initial check.
	let is_stale = run_check_once(args, show_diff, format)?;

	if !watch {
		if is_stale {
			process::exit(1);
		}
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let (tx, rx) = mpsc::channel();

	let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
		if let Ok(event) = res {
			if matches!(
				event.kind,
				notify::EventKind::Modify(_) | notify::EventKind::Create(_)
			) {
				let _ = tx.send(());
			}
		}
	})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, checking...");
		if let Err(e) = run_check_once(args, show_diff, format) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

/// Run a single check and return whether the document is stale.
fn run_check_once(args: &ExdocCli, show_diff: bool, format: OutputFormat) -> AnyResult<bool> {
	let (root, document_path, snippet) = resolve_paths(args)?;
	let document = Document::load(&document_path)?;
	let runner = CargoRunner::new(&root);
	let report = check_document(&document, snippet.as_ref(), &runner)?;
	let rel = make_relative(&document_path, &root);

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"ok": report.is_fresh(),
				"document": rel,
				"code_blocks": report.snippets,
				"runs": report.runs,
			});
			println!("{output}");
		}
		OutputFormat::Text => {
			if report.is_fresh() {
				println!("Check passed: {rel} is up to date.");
			} else {
				eprintln!("Check failed: {rel} is out of date.");
				if show_diff {
					print_diff(&join_lines(&report.current), &join_lines(&report.expected));
				}
				eprintln!("Run `exdoc update` to fix.");
			}
		}
	}

	Ok(!report.is_fresh())
}

fn run_update(args: &ExdocCli, dry_run: bool, watch: bool) -> AnyEmptyResult {
	// Run the initial update.
	run_update_once(args, dry_run)?;

	if !watch || dry_run {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let (tx, rx) = mpsc::channel();

	let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
		if let Ok(event) = res {
			if matches!(
				event.kind,
				notify::EventKind::Modify(_) | notify::EventKind::Create(_)
			) {
				let _ = tx.send(());
			}
		}
	})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, updating...");
		if let Err(e) = run_update_once(args, false) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn run_update_once(args: &ExdocCli, dry_run: bool) -> AnyEmptyResult {
	let (root, document_path, snippet) = resolve_paths(args)?;
	let document = Document::load(&document_path)?;
	let runner = CargoRunner::new(&root);
	let report = rewrite_document(&document, snippet.as_ref(), &runner)?;
	let rel = make_relative(&document_path, &root);

	if report.lines == document.lines {
		println!("{rel} is already up to date.");
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would refresh {} code block(s) and {} example run(s) in {rel}.",
			report.snippets, report.runs
		);
	} else {
		write_document(&document.path, &report.lines)?;
		println!(
			"Refreshed {} code block(s) and {} example run(s) in {rel}.",
			report.snippets, report.runs
		);
	}

	Ok(())
}

fn run_list(args: &ExdocCli) -> AnyEmptyResult {
	let (root, document_path, _) = resolve_paths(args)?;
	let document = Document::load(&document_path)?;
	let rel = make_relative(&document_path, &root);

	let triggers = scan_triggers(&document.lines);
	if triggers.is_empty() {
		println!("No triggers found in {rel}.");
		return Ok(());
	}

	println!("{}", colored!(format!("Triggers in {rel}:"), bold));
	for trigger in &triggers {
		match &trigger.kind {
			TriggerKind::CodeBlock => {
				println!("  {}:{} code block", rel, trigger.line);
			}
			TriggerKind::Run(command) => {
				println!("  {}:{} run `{command}`", rel, trigger.line);
			}
		}
	}
	println!("\n{} trigger(s)", triggers.len());

	Ok(())
}

fn join_lines(lines: &[String]) -> String {
	let mut joined = lines.join("\n");
	joined.push('\n');
	joined
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
