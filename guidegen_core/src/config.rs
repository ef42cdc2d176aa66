use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BuildTool;
use crate::GuidesError;
use crate::GuidesResult;
use crate::Language;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"guidegen.toml",
	".guidegen.toml",
	".config/guidegen.toml",
];

/// Configuration loaded from a `guidegen.toml` file.
///
/// ```toml
/// guides_dir = "guides"
/// package_name = "example.micronaut"
/// default_languages = ["java", "kotlin"]
/// zip_includes_extensions = [".sh", ".bat"]
///
/// [jdk]
/// default = 17
/// env = "JDK_VERSION"
/// graalvm = [17, 21]
///
/// [schema]
/// required = ["title", "intro", "authors"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuidesConfig {
	/// Directory holding one sub-directory per guide, relative to the project
	/// root.
	pub guides_dir: PathBuf,
	/// Name of the metadata file that marks a guide directory.
	pub metadata_file: String,
	/// App name used when an app leaves its name blank.
	pub default_app_name: String,
	/// Package name used when an app leaves its package blank.
	pub package_name: String,
	/// Project name used by the launch links for the default app.
	pub default_project_name: String,
	/// Languages assigned to guides that declare none.
	pub default_languages: Vec<Language>,
	/// Build tools assigned to guides that declare none.
	pub default_build_tools: Vec<BuildTool>,
	/// Check publishable guides against [`SchemaConfig`].
	pub validate_metadata: bool,
	/// Fail parsing when a `base` does not resolve instead of warning.
	pub strict_base: bool,
	/// Base url of the project generator used by `diffLink`.
	pub project_generator_url: String,
	/// Base url of the published API docs, exposed as `@api@`.
	pub api_url: String,
	/// Files in a guide folder with these extensions are copied into every
	/// generated variant.
	pub zip_includes_extensions: Vec<String>,
	/// Only this guide is processed when set.
	pub single_guide: Option<String>,
	pub jdk: JdkConfig,
	pub schema: SchemaConfig,
}

impl Default for GuidesConfig {
	fn default() -> Self {
		Self {
			guides_dir: PathBuf::from("guides"),
			metadata_file: "metadata.json".to_string(),
			default_app_name: "default".to_string(),
			package_name: "example.micronaut".to_string(),
			default_project_name: "micronautguide".to_string(),
			default_languages: Language::ALL.to_vec(),
			default_build_tools: vec![BuildTool::Gradle, BuildTool::Maven],
			validate_metadata: true,
			strict_base: false,
			project_generator_url: "https://launch.micronaut.io/create/default/example.micronaut.micronautguide"
				.to_string(),
			api_url: "https://docs.micronaut.io/latest/api".to_string(),
			zip_includes_extensions: vec![".sh".to_string(), ".bat".to_string()],
			single_guide: None,
			jdk: JdkConfig::default(),
			schema: SchemaConfig::default(),
		}
	}
}

/// JDK selection for generated projects.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JdkConfig {
	/// Version used when the environment variable is unset.
	pub default: u32,
	/// Environment variable holding the JDK major version.
	pub env: String,
	/// JDK versions GraalVM supports. The `graalvm` feature is dropped from
	/// generated projects for any other version.
	pub graalvm: Vec<u32>,
}

impl Default for JdkConfig {
	fn default() -> Self {
		Self {
			default: 17,
			env: "JDK_VERSION".to_string(),
			graalvm: vec![17, 21],
		}
	}
}

/// The structural schema guide metadata must satisfy before publishing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
	/// Keys that must be present and non-empty.
	pub required: Vec<String>,
	/// When false, keys outside the known metadata vocabulary are rejected.
	pub allow_unknown_keys: bool,
}

impl Default for SchemaConfig {
	fn default() -> Self {
		Self {
			required: ["title", "intro", "authors", "categories", "publicationDate"]
				.iter()
				.map(ToString::to_string)
				.collect(),
			allow_unknown_keys: false,
		}
	}
}

impl GuidesConfig {
	/// Resolve the first config file that exists at `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> GuidesResult<Option<GuidesConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: GuidesConfig =
			toml::from_str(&content).map_err(|e| GuidesError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to the defaults.
	pub fn load_or_default(root: &Path) -> GuidesResult<GuidesConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Absolute guides directory for a project rooted at `root`.
	pub fn guides_path(&self, root: &Path) -> PathBuf {
		root.join(&self.guides_dir)
	}

	/// Resolve the JDK version from the configured environment variable.
	pub fn resolve_jdk_version(&self) -> GuidesResult<u32> {
		let value = std::env::var(&self.jdk.env).ok();
		self.jdk_version_from(value.as_deref())
	}

	/// Resolve the JDK version from an already-read environment value.
	pub fn jdk_version_from(&self, value: Option<&str>) -> GuidesResult<u32> {
		let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
			return Ok(self.jdk.default);
		};

		value
			.parse::<u32>()
			.map_err(|_| GuidesError::InvalidJdkVersion {
				variable: self.jdk.env.clone(),
				value: value.to_string(),
			})
	}

	/// Whether GraalVM supports the given JDK version.
	pub fn graalvm_supports(&self, jdk: u32) -> bool {
		self.jdk.graalvm.contains(&jdk)
	}
}
