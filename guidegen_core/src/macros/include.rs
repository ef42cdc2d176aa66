use super::Macro;
use super::MacroSubstitution;
use super::scanner::rewrite_macro_lines;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesResult;
use crate::TestFramework;
use crate::paths;
use crate::paths::Classpath;
use crate::paths::FileType;

/// The generated file a listing macro includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
	/// `source:HelloController[]`, a main source class.
	Source,
	/// `test:HelloControllerTest[]`, a test class renamed to `*Spec` for
	/// Spock.
	Test,
	/// `rawTest:HelloControllerTest[]`, a test class taken as written.
	RawTest,
	/// `resource:application.yml[]`
	Resource,
	/// `testResource:application-test.yml[]`
	TestResource,
	/// `zipInclude:ttfr.sh[]`, a file at the root of the variant.
	ZipInclude,
}

impl IncludeKind {
	fn classpath(self) -> Classpath {
		match self {
			Self::Source | Self::Resource | Self::ZipInclude => Classpath::Main,
			Self::Test | Self::RawTest | Self::TestResource => Classpath::Test,
		}
	}

	fn file_type(self) -> FileType {
		match self {
			Self::Source | Self::Test | Self::RawTest => FileType::Code,
			Self::Resource | Self::TestResource | Self::ZipInclude => FileType::Resource,
		}
	}
}

/// Expands a listing macro into a titled source block that includes the
/// file from the generated variant.
pub struct IncludeMacro {
	kind: IncludeKind,
	default_app_name: String,
	package_name: String,
}

impl IncludeMacro {
	pub fn new(kind: IncludeKind, config: &GuidesConfig) -> Self {
		Self {
			kind,
			default_app_name: config.default_app_name.clone(),
			package_name: config.package_name.clone(),
		}
	}

	/// File name of the included file, with extension.
	fn file_name(&self, target: &str, render: &GuideRender<'_>) -> String {
		match self.kind {
			IncludeKind::Source | IncludeKind::RawTest => {
				format!("{target}.{}", render.language().extension())
			}
			IncludeKind::Test => {
				let name = if render.test_framework() == TestFramework::Spock {
					target
						.strip_suffix("Test")
						.map_or_else(|| target.to_string(), |stem| format!("{stem}Spec"))
				} else {
					target.to_string()
				};
				format!("{name}.{}", render.language().extension())
			}
			IncludeKind::Resource | IncludeKind::TestResource | IncludeKind::ZipInclude => {
				target.to_string()
			}
		}
	}

	/// The path of the included file relative to the variant root.
	fn relative_path(&self, app_name: &str, file_name: &str, render: &GuideRender<'_>) -> String {
		if self.kind == IncludeKind::ZipInclude {
			return file_name.to_string();
		}

		let package_name = render
			.guide
			.app(app_name)
			.map_or(self.package_name.as_str(), |app| app.package_name.as_str());

		paths::source_title(
			&self.default_app_name,
			app_name,
			file_name,
			self.kind.classpath(),
			self.kind.file_type(),
			render.language(),
			package_name,
		)
	}

	/// The included file name and its path relative to the variant root.
	pub(crate) fn locate(&self, invocation: &Macro, render: &GuideRender<'_>) -> (String, String) {
		let app_name = invocation
			.attributes
			.value("app")
			.unwrap_or(&self.default_app_name);
		let file_name = self.file_name(&invocation.target, render);
		let relative_path = self.relative_path(app_name, &file_name, render);
		(file_name, relative_path)
	}

	fn expand(&self, invocation: &Macro, render: &GuideRender<'_>) -> String {
		let attributes = invocation.attributes.without("app");
		let (file_name, relative_path) = self.locate(invocation, render);

		format!(
			"[source,{language}]\n.{title}\n----\ninclude::{{sourceDir}}/{slug}/{source_dir}/{relative_path}[{attributes}]\n----",
			language = paths::source_language(&file_name),
			title = paths::normalize_relative(&relative_path),
			slug = render.guide.slug,
			source_dir = render.source_dir(),
		)
	}
}

impl MacroSubstitution for IncludeMacro {
	fn name(&self) -> &'static str {
		match self.kind {
			IncludeKind::Source => "source",
			IncludeKind::Test => "test",
			IncludeKind::RawTest => "rawTest",
			IncludeKind::Resource => "resource",
			IncludeKind::TestResource => "testResource",
			IncludeKind::ZipInclude => "zipInclude",
		}
	}

	fn order(&self) -> i32 {
		match self.kind {
			IncludeKind::Source => 40,
			IncludeKind::Test => 41,
			IncludeKind::RawTest => 42,
			IncludeKind::Resource => 43,
			IncludeKind::TestResource => 44,
			IncludeKind::ZipInclude => 45,
		}
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			Ok(Some(self.expand(invocation, render)))
		})
	}
}

/// Expands `callout:` and `common:` lines into includes of shared snippet
/// files: `callout:name[attrs]` becomes
/// `include::{calloutsDir}/callout-name.adoc[attrs]`.
pub struct SharedInclude {
	name: &'static str,
	order: i32,
	base_dir: &'static str,
	prefix: &'static str,
}

impl SharedInclude {
	pub fn callout() -> Self {
		Self {
			name: "callout",
			order: 20,
			base_dir: "{calloutsDir}",
			prefix: "callout-",
		}
	}

	pub fn common() -> Self {
		Self {
			name: "common",
			order: 21,
			base_dir: "{commondir}",
			prefix: "common-",
		}
	}
}

impl MacroSubstitution for SharedInclude {
	fn name(&self) -> &'static str {
		self.name
	}

	fn order(&self) -> i32 {
		self.order
	}

	fn substitute(&self, text: &str, _render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name, |invocation| {
			let target = &invocation.target;
			let extension = if target.ends_with(".adoc") { "" } else { ".adoc" };
			Ok(Some(format!(
				"include::{}/{}{target}{extension}[{}]",
				self.base_dir, self.prefix, invocation.attributes
			)))
		})
	}
}
