use std::collections::BTreeSet;

use url::Url;

use super::Macro;
use super::MacroSubstitution;
use super::scanner::rewrite_macro_lines;
use crate::ApplicationType;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesResult;
use crate::paths;

/// `diffLink:[app=..,features=..,featureExcludes=..]` becomes a project
/// generator link showing what the guide adds to a fresh project.
pub struct DiffLink {
	project_generator_url: String,
	default_app_name: String,
	default_project_name: String,
	package_name: String,
}

impl DiffLink {
	pub fn new(config: &GuidesConfig) -> Self {
		Self {
			project_generator_url: config.project_generator_url.clone(),
			default_app_name: config.default_app_name.clone(),
			default_project_name: config.default_project_name.clone(),
			package_name: config.package_name.clone(),
		}
	}

	fn link(&self, invocation: &Macro, render: &GuideRender<'_>) -> GuidesResult<String> {
		let attributes = &invocation.attributes;
		let app = match attributes.value("app") {
			Some(name) => Some(render.guide.require_app(name, self.name())?),
			None => render.guide.app(&self.default_app_name),
		};
		let app_name = attributes.value("app").unwrap_or(&self.default_app_name);
		let project_name = if app_name == self.default_app_name {
			self.default_project_name.as_str()
		} else {
			app_name
		};

		let mut features: BTreeSet<String> = app
			.map(|app| app.visible_features(render.language()))
			.unwrap_or_default()
			.into_iter()
			.collect();
		features.extend(attributes.values("features"));
		for excluded in attributes.values("featureExcludes") {
			features.remove(&excluded);
		}

		let application_type = app.map_or(ApplicationType::Default, |app| app.application_type);
		let mut query = vec![
			("lang", render.language().as_str().to_uppercase()),
			("build", render.build_tool().as_str().to_uppercase()),
			("test", render.test_framework().as_str().to_uppercase()),
			("name", project_name.to_string()),
			("type", application_type.launch_name().to_string()),
			("package", self.package_name.clone()),
			("activity", "diff".to_string()),
		];
		query.extend(features.into_iter().map(|feature| ("features", feature)));

		let url = Url::parse_with_params(&self.project_generator_url, &query).map_err(|e| {
			GuidesError::ConfigParse(format!(
				"invalid project_generator_url `{}`: {e}",
				self.project_generator_url
			))
		})?;

		Ok(format!("{url}[Diff]"))
	}
}

impl MacroSubstitution for DiffLink {
	fn name(&self) -> &'static str {
		"diffLink"
	}

	fn order(&self) -> i32 {
		10
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			self.link(invocation, render).map(Some)
		})
	}
}

/// `guideLink:other-guide[Link text]` links to the same variant of another
/// guide.
pub struct GuideLink;

impl MacroSubstitution for GuideLink {
	fn name(&self) -> &'static str {
		"guideLink"
	}

	fn order(&self) -> i32 {
		50
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			if invocation.target.is_empty() {
				return Ok(None);
			}
			let label = invocation
				.attributes
				.positional()
				.unwrap_or_else(|| invocation.target.clone());
			Ok(Some(format!(
				"link:{}.html[{label}]",
				paths::source_dir(&invocation.target, &render.option)
			)))
		})
	}
}
