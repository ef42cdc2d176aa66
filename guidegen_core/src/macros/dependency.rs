use super::Macro;
use super::MacroSubstitution;
use super::scanner::rewrite_macro_lines;
use crate::BuildTool;
use crate::GuideRender;
use crate::GuidesResult;
use crate::Language;

const DEFAULT_GROUP_ID: &str = "io.micronaut";
const DEFAULT_SCOPE: &str = "implementation";

/// `dependency:micronaut-http-client[groupId=io.micronaut,scope=testImplementation]`
/// becomes the dependency declaration of the variant's build tool.
pub struct DependencyMacro;

impl DependencyMacro {
	fn expand(invocation: &Macro, render: &GuideRender<'_>) -> String {
		let attributes = &invocation.attributes;
		let dependency = Dependency {
			group_id: attributes.value("groupId").unwrap_or(DEFAULT_GROUP_ID),
			artifact_id: &invocation.target,
			version: attributes.value("version"),
			scope: attributes.value("scope").unwrap_or(DEFAULT_SCOPE),
			callout: attributes.value("callout"),
		};

		match render.build_tool() {
			BuildTool::Gradle => dependency.gradle("groovy", "build.gradle", render.language()),
			BuildTool::GradleKotlin => {
				dependency.gradle("kotlin", "build.gradle.kts", render.language())
			}
			BuildTool::Maven => dependency.maven(),
		}
	}
}

impl MacroSubstitution for DependencyMacro {
	fn name(&self) -> &'static str {
		"dependency"
	}

	fn order(&self) -> i32 {
		30
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			if invocation.target.is_empty() {
				return Ok(None);
			}
			Ok(Some(Self::expand(invocation, render)))
		})
	}
}

struct Dependency<'a> {
	group_id: &'a str,
	artifact_id: &'a str,
	version: Option<&'a str>,
	scope: &'a str,
	callout: Option<&'a str>,
}

impl Dependency<'_> {
	fn gradle(&self, listing: &str, title: &str, language: Language) -> String {
		let configuration = match (self.scope, language) {
			("annotationProcessor", Language::Kotlin) => "kapt",
			("annotationProcessor", Language::Groovy) => "compileOnly",
			("testAnnotationProcessor", Language::Kotlin) => "kaptTest",
			("testAnnotationProcessor", Language::Groovy) => "testCompileOnly",
			(scope, _) => scope,
		};
		let coordinates = match self.version {
			Some(version) => format!("{}:{}:{version}", self.group_id, self.artifact_id),
			None => format!("{}:{}", self.group_id, self.artifact_id),
		};
		let callout = self
			.callout
			.map(|callout| format!(" <{callout}>"))
			.unwrap_or_default();

		format!("[source,{listing}]\n.{title}\n----\n{configuration}(\"{coordinates}\"){callout}\n----")
	}

	fn maven(&self) -> String {
		let callout = self
			.callout
			.map(|callout| format!(" <{callout}>"))
			.unwrap_or_default();
		let version = self
			.version
			.map(|version| format!("    <version>{version}</version>\n"))
			.unwrap_or_default();

		let body = if matches!(self.scope, "annotationProcessor" | "testAnnotationProcessor") {
			format!(
				"<!-- Add the following to your annotationProcessorPaths element -->\n<path>\n    \
				 <groupId>{}</groupId>\n    <artifactId>{}</artifactId>\n{version}</path>{callout}",
				self.group_id, self.artifact_id
			)
		} else {
			let scope = match self.scope {
				"testImplementation" | "testCompileOnly" | "testRuntimeOnly" => "test",
				"runtimeOnly" => "runtime",
				"compileOnly" => "provided",
				_ => "compile",
			};
			format!(
				"<dependency>\n    <groupId>{}</groupId>\n    <artifactId>{}</artifactId>\n{version}    \
				 <scope>{scope}</scope>\n</dependency>{callout}",
				self.group_id, self.artifact_id
			)
		};

		format!("[source,xml]\n.pom.xml\n----\n{body}\n----")
	}
}
