use serde::Serialize;

use super::Macro;
use super::MacroSubstitution;
use super::scanner::rewrite_macro_lines;
use crate::BuildTool;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesResult;

const CODE_START: &str =
	r#"<code class="language-bash hljs" data-highlighted="yes"  style="white-space: pre-line;">"#;
const CODE_END: &str = "</code>";

const GRADLE_MAVEN_TABS: &str = r##"++++
<div id="tabs-doc1" class="ui-tabs ui-corner-all ui-widget ui-widget-content">
    <ul role="tablist" class="ui-tabs-nav ui-corner-all ui-helper-reset ui-helper-clearfix ui-widget-header">
        <li class="tabs-gradle ui-tabs-tab ui-corner-top ui-state-default ui-tabs-active ui-state-active" role="tab" tabindex="0" aria-controls="gradle" aria-labelledby="ui-id-1" aria-selected="true" aria-expanded="true"><a name="gradle" href="#gradle" tabindex="-1" class="ui-tabs-anchor" id="ui-id-1">Gradle</a></li>
        <li class="tabs-maven ui-tabs-tab ui-corner-top ui-state-default" role="tab" tabindex="-1" aria-controls="maven" aria-labelledby="ui-id-2" aria-selected="false" aria-expanded="false"><a name="maven" href="#maven" tabindex="-1" class="ui-tabs-anchor" id="ui-id-2">Maven</a></li>
    </ul>
    <div id="gradle" aria-labelledby="ui-id-1" role="tabpanel" class="ui-tabs-panel ui-corner-bottom ui-widget-content" aria-hidden="false">
        {{ gradle }}
    </div>
    <div id="maven" aria-labelledby="ui-id-2" role="tabpanel" class="ui-tabs-panel ui-corner-bottom ui-widget-content" aria-hidden="true" style="display: none;">
        {{ maven }}
    </div>
</div>
++++
"##;

const ENVIRONMENT_VARS_TABS: &str = r##"++++
<div class="tabs-doc ui-tabs ui-corner-all ui-widget ui-widget-content" data-name="system">
    <div data-value="linux" data-label="Linux &amp; macOS" id="linux" aria-labelledby="ui-id-11" role="tabpanel" class="ui-tabs-panel ui-corner-bottom ui-widget-content" aria-hidden="false" style="">
      <pre><code class="language-bash hljs" data-highlighted="yes">{% for var in vars %}<span class="hljs-built_in">export</span> {{ var.name }}={{ var.value }}
{% endfor %}</code><button>Copy</button></pre>
    </div>
    <div data-value="windows" data-label="Windows" id="windows" aria-labelledby="ui-id-12" role="tabpanel" class="ui-tabs-panel ui-corner-bottom ui-widget-content" aria-hidden="true" style="display: none;">
      <pre><code class="language-bash hljs" data-highlighted="yes">{% for var in vars %}<span class="hljs-built_in">set</span> {{ var.name }}={{ var.value }}
{% endfor %}</code><button>Copy</button></pre>
    </div>
    <div data-value="windows-powershell" data-label="Windows PowerShell" id="windows-powershell" aria-labelledby="ui-id-13" role="tabpanel" class="ui-tabs-panel ui-corner-bottom ui-widget-content" aria-hidden="true" style="display: none;">
      <pre><code class="language-bash hljs" data-highlighted="yes">{% for var in vars %}<span class="hljs-variable">$ENV</span> {{ var.name }} = <span class="hljs-string">"{{ var.value }}"</span>
{% endfor %}</code><button>Copy</button></pre>
    </div>
</div>
++++
"##;

/// Render one of the tab templates through minijinja.
fn render_tabs(name: &str, source: &str, context: impl Serialize) -> GuidesResult<String> {
	let mut env = minijinja::Environment::new();
	env.set_keep_trailing_newline(true);
	env.add_template(name, source)
		.map_err(|e| GuidesError::TemplateRender(e.to_string()))?;

	let template = env
		.get_template(name)
		.map_err(|e| GuidesError::TemplateRender(e.to_string()))?;

	template
		.render(minijinja::Value::from_serialize(context))
		.map_err(|e| GuidesError::TemplateRender(e.to_string()))
}

#[derive(Serialize)]
struct GradleMavenContext {
	gradle: String,
	maven: String,
}

/// Gradle and Maven tabs with the given panel contents.
pub fn gradle_maven_tabs(gradle: String, maven: String) -> GuidesResult<String> {
	render_tabs(
		"gradle-maven-tabs",
		GRADLE_MAVEN_TABS,
		GradleMavenContext { gradle, maven },
	)
}

fn code(command: &str) -> String {
	format!("{CODE_START}{command}{CODE_END}")
}

/// `gradle-maven-command:[gradle=./gradlew run,maven=./mvnw mn:run]`
pub struct GradleMavenCommand;

impl GradleMavenCommand {
	fn panel(invocation: &Macro, key: &str) -> String {
		invocation
			.attributes
			.get(key)
			.map(|attribute| code(&attribute.values.join(" ")))
			.unwrap_or_default()
	}
}

impl MacroSubstitution for GradleMavenCommand {
	fn name(&self) -> &'static str {
		"gradle-maven-command"
	}

	fn order(&self) -> i32 {
		61
	}

	fn substitute(&self, text: &str, _render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			gradle_maven_tabs(
				Self::panel(invocation, "gradle"),
				Self::panel(invocation, "maven"),
			)
			.map(Some)
		})
	}
}

#[derive(Serialize)]
struct EnvironmentVar<'a> {
	name: &'a str,
	value: &'a str,
}

#[derive(Serialize)]
struct EnvironmentVarsContext<'a> {
	vars: Vec<EnvironmentVar<'a>>,
}

/// `environment-vars:[NAME=value,...]` becomes Linux, Windows and
/// PowerShell tabs exporting the variables.
pub struct EnvironmentVars;

impl MacroSubstitution for EnvironmentVars {
	fn name(&self) -> &'static str {
		"environment-vars"
	}

	fn order(&self) -> i32 {
		62
	}

	fn substitute(&self, text: &str, _render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			let vars = invocation
				.attributes
				.iter()
				.filter(|attribute| !attribute.is_positional())
				.map(|attribute| {
					EnvironmentVar {
						name: &attribute.key,
						value: attribute.value().unwrap_or_default(),
					}
				})
				.collect();

			render_tabs(
				"environment-vars-tabs",
				ENVIRONMENT_VARS_TABS,
				EnvironmentVarsContext { vars },
			)
			.map(Some)
		})
	}
}

/// `create-app:default[]` becomes Gradle and Maven tabs with the `mn`
/// command that creates the app.
pub struct CreateApp {
	default_app_name: String,
	default_project_name: String,
}

impl CreateApp {
	pub fn new(config: &GuidesConfig) -> Self {
		Self {
			default_app_name: config.default_app_name.clone(),
			default_project_name: config.default_project_name.clone(),
		}
	}

	fn command(&self, invocation: &Macro, render: &GuideRender<'_>, build_tool: BuildTool) -> GuidesResult<String> {
		let app_name = if invocation.target.is_empty() {
			self.default_app_name.as_str()
		} else {
			invocation.target.as_str()
		};
		let app = render.guide.require_app(app_name, self.name())?;
		let project_name = if app_name == self.default_app_name {
			self.default_project_name.as_str()
		} else {
			app_name
		};
		let test_framework = app.test_framework.unwrap_or(render.test_framework());

		let mut lines = vec![format!(
			"mn {} {}.{project_name}",
			app.application_type.cli_command(),
			app.package_name
		)];
		let features = app.visible_features(render.language());
		if !features.is_empty() {
			lines.push(format!(" --features={}", features.join(",")));
		}
		lines.push(format!(" --build={build_tool}"));
		lines.push(format!(" --lang={}", render.language()));
		lines.push(format!(" --test={test_framework}"));

		Ok(code(&lines.join(" \\\n")))
	}
}

impl MacroSubstitution for CreateApp {
	fn name(&self) -> &'static str {
		"create-app"
	}

	fn order(&self) -> i32 {
		60
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			gradle_maven_tabs(
				self.command(invocation, render, BuildTool::Gradle)?,
				self.command(invocation, render, BuildTool::Maven)?,
			)
			.map(Some)
		})
	}
}
