use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::ApplicationType;
use crate::BuildTool;
use crate::Guide;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesOption;
use crate::GuidesResult;
use crate::Language;
use crate::TestFramework;
use crate::paths;

/// Document attributes handed to the converter for one rendered variant.
/// `source_dir` is the root of all generated code, `variant_dir` the tree of
/// this variant.
pub fn render_attributes(
	render: &GuideRender<'_>,
	source_dir: &Path,
	variant_dir: &Path,
) -> BTreeMap<String, String> {
	let guide = render.guide;
	let mut attributes = BTreeMap::new();

	if let Some(cloud) = guide.cloud {
		attributes.insert("cloud".to_string(), cloud.acronym().to_string());
	}
	attributes.insert("language".to_string(), render.language().to_string());
	attributes.insert("testFramework".to_string(), render.test_framework().to_string());
	attributes.insert("buildTool".to_string(), render.build_tool().to_string());
	attributes.insert("intro".to_string(), guide.intro.clone());
	attributes.insert("title".to_string(), guide.title.clone());
	attributes.insert("sourcedir".to_string(), source_dir.display().to_string());
	attributes.insert(
		"guidesourcedir".to_string(),
		variant_dir.display().to_string(),
	);

	attributes
}

/// Turns expanded markup into a published document.
pub trait DocumentConverter {
	/// Extension of the files this converter produces.
	fn extension(&self) -> &str {
		"html"
	}

	fn convert(
		&self,
		markup: &str,
		base_dir: &Path,
		attributes: &BTreeMap<String, String>,
	) -> GuidesResult<String>;
}

/// Writes the expanded markup unchanged, for external conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughConverter;

impl DocumentConverter for PassthroughConverter {
	fn extension(&self) -> &str {
		"adoc"
	}

	fn convert(
		&self,
		markup: &str,
		_base_dir: &Path,
		_attributes: &BTreeMap<String, String>,
	) -> GuidesResult<String> {
		Ok(markup.to_string())
	}
}

/// What to ask the project generator for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
	pub application_type: ApplicationType,
	/// `<package>.<name>` of the generated application.
	pub name: String,
	pub framework: String,
	pub language: Language,
	pub build_tool: BuildTool,
	pub test_framework: TestFramework,
	pub features: Vec<String>,
	pub jdk: u32,
	/// Folder of the app inside the variant, for guides with several apps.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_folder: Option<String>,
}

/// Creates the skeleton of an example application.
pub trait ProjectGenerator {
	fn generate(&self, request: &GenerationRequest, destination: &Path) -> GuidesResult<()>;
}

/// Records each request as `project.json` in the destination instead of
/// generating a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestGenerator;

impl ProjectGenerator for ManifestGenerator {
	fn generate(&self, request: &GenerationRequest, destination: &Path) -> GuidesResult<()> {
		std::fs::create_dir_all(destination)?;
		let manifest =
			serde_json::to_string_pretty(request).map_err(|e| GuidesError::ProjectGeneration {
				slug: request.name.clone(),
				reason: e.to_string(),
			})?;
		std::fs::write(destination.join("project.json"), manifest + "\n")?;
		Ok(())
	}
}

/// One generation request per app of `guide` for the given variant.
///
/// Projects are named `<package>.<app name>`. An app's own test framework
/// wins over the variant's. The `graalvm` feature is dropped when GraalVM
/// does not support `jdk`.
pub fn generation_requests(
	guide: &Guide,
	option: &GuidesOption,
	config: &GuidesConfig,
	jdk: u32,
) -> Vec<GenerationRequest> {
	guide
		.apps
		.iter()
		.map(|app| {
			let mut features = app.features(option.language);
			if !config.graalvm_supports(jdk) {
				features.retain(|feature| feature != "graalvm");
			}

			GenerationRequest {
				application_type: app.application_type,
				name: format!("{}.{}", app.package_name, app.name),
				framework: app.framework.clone(),
				language: option.language,
				build_tool: option.build_tool,
				test_framework: app.test_framework.unwrap_or(option.test_framework),
				features,
				jdk,
				app_folder: paths::app_folder(guide, app).map(ToString::to_string),
			}
		})
		.collect()
}
