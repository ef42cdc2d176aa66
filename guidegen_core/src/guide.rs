use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::BuildTool;
use crate::GuidesError;
use crate::GuidesOption;
use crate::GuidesResult;
use crate::Language;
use crate::TestFramework;
use crate::paths;

/// A documentation unit read from a guide directory's `metadata.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guide {
	pub title: String,
	pub intro: String,
	pub authors: Vec<String>,
	/// Ordered, the first entry is the primary category.
	pub categories: Vec<String>,
	pub publication_date: Option<NaiveDate>,
	pub cloud: Option<Cloud>,
	pub tags: Vec<String>,
	pub languages: Vec<Language>,
	pub build_tools: Vec<BuildTool>,
	pub test_framework: Option<TestFramework>,
	pub skip_gradle_tests: bool,
	pub skip_maven_tests: bool,
	pub minimum_java_version: Option<u32>,
	pub maximum_java_version: Option<u32>,
	/// File name of the asciidoc document inside the guide folder.
	pub asciidoctor: Option<String>,
	pub publish: bool,
	pub slug: String,
	pub zip_includes: Vec<String>,
	/// Slug of the guide this one inherits from.
	pub base: Option<String>,
	pub env: BTreeMap<String, String>,
	pub apps: Vec<App>,
	pub source_module: Option<String>,
	pub base_source_module: Option<String>,
	/// Directory the guide was read from.
	#[serde(skip)]
	pub folder: PathBuf,
}

impl Default for Guide {
	fn default() -> Self {
		Self {
			title: String::new(),
			intro: String::new(),
			authors: Vec::new(),
			categories: Vec::new(),
			publication_date: None,
			cloud: None,
			tags: Vec::new(),
			languages: Vec::new(),
			build_tools: Vec::new(),
			test_framework: None,
			skip_gradle_tests: false,
			skip_maven_tests: false,
			minimum_java_version: None,
			maximum_java_version: None,
			asciidoctor: None,
			publish: true,
			slug: String::new(),
			zip_includes: Vec::new(),
			base: None,
			env: BTreeMap::new(),
			apps: Vec::new(),
			source_module: None,
			base_source_module: None,
			folder: PathBuf::new(),
		}
	}
}

impl Guide {
	/// Whether tests for `build_tool` are skipped, which removes its variants.
	pub fn should_skip(&self, build_tool: BuildTool) -> bool {
		if build_tool.is_gradle() {
			self.skip_gradle_tests
		} else {
			self.skip_maven_tests
		}
	}

	pub fn app(&self, name: &str) -> Option<&App> {
		self.apps.iter().find(|app| app.name == name)
	}

	/// Look up an app referenced by a macro, failing when it is not declared.
	pub fn require_app(&self, name: &str, macro_name: &str) -> GuidesResult<&App> {
		self.app(name).ok_or_else(|| {
			GuidesError::UnknownApp {
				slug: self.slug.clone(),
				app: name.to_string(),
				macro_name: macro_name.to_string(),
				available: self.app_names().join(", "),
			}
		})
	}

	pub fn app_names(&self) -> Vec<&str> {
		self.apps.iter().map(|app| app.name.as_str()).collect()
	}

	/// Path of the guide's asciidoc document, when it has one.
	pub fn asciidoc_path(&self) -> Option<PathBuf> {
		self.asciidoctor
			.as_ref()
			.map(|file_name| self.folder.join(file_name))
	}
}

/// One example application that belongs to a guide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct App {
	pub name: String,
	pub package_name: String,
	pub application_type: ApplicationType,
	pub framework: String,
	pub features: Vec<String>,
	/// Features the generated project needs but the guide does not mention.
	pub invisible_features: Vec<String>,
	pub java_features: Vec<String>,
	pub kotlin_features: Vec<String>,
	pub groovy_features: Vec<String>,
	/// Source files left out of the generated tree. `all` drops every file.
	pub exclude_source: Vec<String>,
	pub exclude_test: Vec<String>,
	pub test_framework: Option<TestFramework>,
	pub validate_license: bool,
}

impl Default for App {
	fn default() -> Self {
		Self {
			name: String::new(),
			package_name: String::new(),
			application_type: ApplicationType::Default,
			framework: "Micronaut".to_string(),
			features: Vec::new(),
			invisible_features: Vec::new(),
			java_features: Vec::new(),
			kotlin_features: Vec::new(),
			groovy_features: Vec::new(),
			exclude_source: Vec::new(),
			exclude_test: Vec::new(),
			test_framework: None,
			validate_license: true,
		}
	}
}

impl App {
	pub fn language_features(&self, language: Language) -> &[String] {
		match language {
			Language::Java => &self.java_features,
			Language::Kotlin => &self.kotlin_features,
			Language::Groovy => &self.groovy_features,
		}
	}

	/// Every feature the generated project is created with.
	pub fn features(&self, language: Language) -> Vec<String> {
		self.features
			.iter()
			.chain(&self.invisible_features)
			.chain(self.language_features(language))
			.cloned()
			.collect()
	}

	/// Features mentioned in the guide's prose.
	pub fn visible_features(&self, language: Language) -> Vec<String> {
		self.features
			.iter()
			.chain(self.language_features(language))
			.cloned()
			.collect()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
	#[default]
	#[serde(alias = "DEFAULT")]
	Default,
	#[serde(alias = "CLI")]
	Cli,
	#[serde(alias = "FUNCTION")]
	Function,
	#[serde(alias = "GRPC")]
	Grpc,
	#[serde(alias = "MESSAGING")]
	Messaging,
}

impl ApplicationType {
	/// The `mn` command that creates an application of this type.
	pub fn cli_command(self) -> &'static str {
		match self {
			Self::Default => "create-app",
			Self::Cli => "create-cli-app",
			Self::Function => "create-function-app",
			Self::Grpc => "create-grpc-app",
			Self::Messaging => "create-messaging-app",
		}
	}

	/// Upper-case name used in launch urls.
	pub fn launch_name(self) -> &'static str {
		match self {
			Self::Default => "DEFAULT",
			Self::Cli => "CLI",
			Self::Function => "FUNCTION",
			Self::Grpc => "GRPC",
			Self::Messaging => "MESSAGING",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cloud {
	#[serde(alias = "oci")]
	Oci,
	#[serde(alias = "aws")]
	Aws,
	#[serde(alias = "azure")]
	Azure,
	#[serde(alias = "gcp")]
	Gcp,
}

impl Cloud {
	pub fn name(self) -> &'static str {
		match self {
			Self::Oci => "Oracle Cloud",
			Self::Aws => "Amazon Web Services",
			Self::Azure => "Microsoft Azure",
			Self::Gcp => "Google Cloud Platform",
		}
	}

	pub fn acronym(self) -> &'static str {
		match self {
			Self::Oci => "OCI",
			Self::Aws => "AWS",
			Self::Azure => "Azure",
			Self::Gcp => "GCP",
		}
	}

	/// Position in cloud listings.
	pub fn order(self) -> u8 {
		match self {
			Self::Oci => 1,
			Self::Aws => 2,
			Self::Azure => 3,
			Self::Gcp => 4,
		}
	}
}

/// A guide paired with the variant it is rendered for. Every macro handler
/// reads from this and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct GuideRender<'a> {
	pub guide: &'a Guide,
	pub option: GuidesOption,
	/// Root holding the generated variant trees, for handlers that embed
	/// generated files.
	pub output_dir: Option<&'a Path>,
}

impl<'a> GuideRender<'a> {
	pub fn new(guide: &'a Guide, option: GuidesOption) -> Self {
		Self {
			guide,
			option,
			output_dir: None,
		}
	}

	#[must_use]
	pub fn with_output_dir(mut self, output_dir: &'a Path) -> Self {
		self.output_dir = Some(output_dir);
		self
	}

	pub fn language(&self) -> Language {
		self.option.language
	}

	pub fn build_tool(&self) -> BuildTool {
		self.option.build_tool
	}

	pub fn test_framework(&self) -> TestFramework {
		self.option.test_framework
	}

	/// Name of the generated directory for this variant.
	pub fn source_dir(&self) -> String {
		paths::source_dir(&self.guide.slug, &self.option)
	}
}
