use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ExdocError;
use crate::ExdocResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["exdoc.toml", ".exdoc.toml"];

/// Default document path when no config file is present.
pub const DEFAULT_DOCUMENT: &str = "README.md";

/// Configuration loaded from an `exdoc.toml` file.
///
/// ```toml
/// document = "README.md"
/// snippet = "examples/send_mail.rs"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ExdocConfig {
	/// The markdown document rewritten in place.
	#[serde(default = "default_document")]
	pub document: PathBuf,
	/// The example source file spliced into the rust code block. Only
	/// required when the document actually contains that block.
	#[serde(default)]
	pub snippet: Option<PathBuf>,
}

impl Default for ExdocConfig {
	fn default() -> Self {
		Self {
			document: default_document(),
			snippet: None,
		}
	}
}

fn default_document() -> PathBuf {
	PathBuf::from(DEFAULT_DOCUMENT)
}

impl ExdocConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns defaults if no config file exists.
	pub fn load(root: &Path) -> ExdocResult<ExdocConfig> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(ExdocConfig::default());
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: ExdocConfig =
			toml::from_str(&content).map_err(|e| ExdocError::ConfigParse(e.to_string()))?;

		Ok(config)
	}
}
