use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::Guide;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesResult;

/// Source language of a generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	#[serde(alias = "JAVA")]
	Java,
	#[serde(alias = "GROOVY")]
	Groovy,
	#[serde(alias = "KOTLIN")]
	Kotlin,
}

impl Language {
	/// Every language in matrix order.
	pub const ALL: [Language; 3] = [Language::Java, Language::Groovy, Language::Kotlin];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Java => "java",
			Self::Groovy => "groovy",
			Self::Kotlin => "kotlin",
		}
	}

	/// File extension of source files in this language.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Java => "java",
			Self::Groovy => "groovy",
			Self::Kotlin => "kt",
		}
	}

	/// Test framework used when a guide does not pick one.
	pub fn default_test_framework(self) -> TestFramework {
		match self {
			Self::Groovy => TestFramework::Spock,
			Self::Java | Self::Kotlin => TestFramework::Junit,
		}
	}
}

/// Build tool of a generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum BuildTool {
	#[serde(rename = "gradle", alias = "GRADLE")]
	Gradle,
	#[serde(rename = "gradle_kotlin", alias = "GRADLE_KOTLIN")]
	GradleKotlin,
	#[serde(rename = "maven", alias = "MAVEN")]
	Maven,
}

impl BuildTool {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Gradle => "gradle",
			Self::GradleKotlin => "gradle_kotlin",
			Self::Maven => "maven",
		}
	}

	pub fn is_gradle(self) -> bool {
		matches!(self, Self::Gradle | Self::GradleKotlin)
	}

	/// Display label used in tabs and prose.
	pub fn label(self) -> &'static str {
		match self {
			Self::Gradle => "Gradle",
			Self::GradleKotlin => "Gradle Kotlin",
			Self::Maven => "Maven",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
	#[serde(alias = "JUNIT")]
	Junit,
	#[serde(alias = "SPOCK")]
	Spock,
	#[serde(alias = "KOTEST")]
	Kotest,
}

impl TestFramework {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Junit => "junit",
			Self::Spock => "spock",
			Self::Kotest => "kotest",
		}
	}

	/// Class name suffix of test classes written for this framework.
	pub fn test_suffix(self) -> &'static str {
		match self {
			Self::Spock => "Spec",
			Self::Junit | Self::Kotest => "Test",
		}
	}
}

macro_rules! impl_variant_str {
	($type:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
		impl fmt::Display for $type {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl FromStr for $type {
			type Err = GuidesError;

			fn from_str(value: &str) -> Result<Self, Self::Err> {
				[$($variant),+]
					.into_iter()
					.find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
					.ok_or_else(|| GuidesError::UnknownValue {
						kind: $kind.to_string(),
						value: value.to_string(),
					})
			}
		}
	};
}

impl_variant_str!(Language, "language", [Language::Java, Language::Groovy, Language::Kotlin]);
impl_variant_str!(
	BuildTool,
	"build tool",
	[BuildTool::Gradle, BuildTool::GradleKotlin, BuildTool::Maven]
);
impl_variant_str!(
	TestFramework,
	"test framework",
	[TestFramework::Junit, TestFramework::Spock, TestFramework::Kotest]
);

/// One publishing variant of a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidesOption {
	pub build_tool: BuildTool,
	pub language: Language,
	pub test_framework: TestFramework,
}

impl GuidesOption {
	pub fn new(build_tool: BuildTool, language: Language, test_framework: TestFramework) -> Self {
		Self {
			build_tool,
			language,
			test_framework,
		}
	}
}

impl Default for GuidesOption {
	/// The single variant rendered for guides without apps.
	fn default() -> Self {
		Self::new(BuildTool::Gradle, Language::Java, TestFramework::Junit)
	}
}

impl fmt::Display for GuidesOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}-{}-{}",
			self.build_tool, self.language, self.test_framework
		)
	}
}

/// Expand a guide into its publishing variants.
///
/// Build tools are visited in declaration order and languages in
/// [`Language::ALL`] order. A build tool the guide skips contributes no
/// variants at all.
pub fn guides_options(guide: &Guide) -> Vec<GuidesOption> {
	let mut options = Vec::new();

	for &build_tool in &guide.build_tools {
		for language in Language::ALL {
			if guide.should_skip(build_tool) {
				info!(
					"Skipping {build_tool}/{language} variant of guide {}",
					guide.slug
				);
				continue;
			}

			if guide.languages.contains(&language) {
				options.push(GuidesOption::new(
					build_tool,
					language,
					test_framework_option(guide, language),
				));
			}
		}
	}

	options
}

/// The test framework a guide uses for `language`.
pub fn test_framework_option(guide: &Guide, language: Language) -> TestFramework {
	guide
		.test_framework
		.unwrap_or_else(|| language.default_test_framework())
}

/// The JDK version a guide is generated with: the resolved version, raised
/// to the guide's minimum when that is higher.
pub fn jdk_version_for(guide: &Guide, resolved: u32) -> u32 {
	match guide.minimum_java_version {
		Some(minimum) if minimum > resolved => {
			debug!(
				"guide {} requires jdk {minimum}, raising from {resolved}",
				guide.slug
			);
			minimum
		}
		_ => resolved,
	}
}

/// Whether the resolved JDK falls outside the guide's supported range.
pub fn skip_because_of_java_version(guide: &Guide, jdk: u32) -> bool {
	guide
		.minimum_java_version
		.is_some_and(|minimum| jdk < minimum)
		|| guide
			.maximum_java_version
			.is_some_and(|maximum| jdk > maximum)
}

/// Whether a guide takes part in this run: it must be publishable, match the
/// single-guide filter and, when `check_jdk` is set, accept the JDK.
pub fn process(guide: &Guide, check_jdk: bool, config: &GuidesConfig, jdk: u32) -> bool {
	if !guide.publish {
		return false;
	}

	if let Some(single) = config.single_guide.as_deref() {
		if single != guide.slug {
			return false;
		}
	}

	if check_jdk && skip_because_of_java_version(guide, jdk) {
		info!(
			"Skipping guide {}: jdk {jdk} outside its supported range",
			guide.slug
		);
		return false;
	}

	true
}

/// The variants a guide is rendered in. Guides without apps have no
/// generated code and render once in the default variant.
pub fn render_options(guide: &Guide) -> Vec<GuidesOption> {
	if guide.apps.is_empty() {
		vec![GuidesOption::default()]
	} else {
		guides_options(guide)
	}
}

/// Pick the variant of a guide matching `build_tool` and `language`, falling
/// back to its first variant.
pub fn select_option(
	guide: &Guide,
	build_tool: Option<BuildTool>,
	language: Option<Language>,
) -> GuidesResult<GuidesOption> {
	render_options(guide)
		.into_iter()
		.find(|option| {
			build_tool.is_none_or(|build_tool| option.build_tool == build_tool)
				&& language.is_none_or(|language| option.language == language)
		})
		.ok_or_else(|| GuidesError::UnknownVariant {
			slug: guide.slug.clone(),
			build_tool: build_tool.map_or_else(|| "any".to_string(), |b| b.to_string()),
			language: language.map_or_else(|| "any".to_string(), |l| l.to_string()),
		})
}
