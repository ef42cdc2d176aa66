//! The macro language embedded in guide markup and the ordered pipeline
//! that expands it.
//!
//! Two invocation shapes exist. Line macros take a whole line of the form
//! `name:target[key=value,...]`; placeholders are inline `@name@` or
//! `@app:name@` tokens. Exclusion blocks are fenced by `:exclude-for-*:`
//! marker lines.

use tracing::debug;

use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesResult;

pub use attribute::*;
pub use dependency::*;
pub use exclusion::*;
pub use include::*;
pub use links::*;
pub use placeholder::*;
pub use scanner::*;
pub use snippet::*;
pub use tabs::*;

mod attribute;
mod dependency;
mod exclusion;
mod include;
mod links;
mod placeholder;
mod scanner;
mod snippet;
mod tabs;

/// One kind of macro expansion.
///
/// A handler rewrites every invocation it recognizes in one traversal of
/// the text. It keeps no state between calls.
pub trait MacroSubstitution: Send + Sync {
	/// The macro name this handler expands.
	fn name(&self) -> &'static str;

	fn handles(&self, name: &str) -> bool {
		self.name() == name
	}

	/// Position in the pipeline, lower runs first.
	fn order(&self) -> i32;

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String>;
}

/// Handlers applied one after the other in ascending order.
pub struct MacroPipeline {
	handlers: Vec<Box<dyn MacroSubstitution>>,
}

impl MacroPipeline {
	/// A pipeline of the given handlers. Handlers with equal order keep
	/// their relative position.
	pub fn new(mut handlers: Vec<Box<dyn MacroSubstitution>>) -> Self {
		handlers.sort_by_key(|handler| handler.order());
		Self { handlers }
	}

	/// The full macro vocabulary. `jdk` is the resolved JDK version used by
	/// the JDK exclusion and `@minJdk@`.
	pub fn with_defaults(config: &GuidesConfig, jdk: u32) -> Self {
		Self::new(vec![
			Box::new(MacroExclusion::new(ExclusionKind::Build)),
			Box::new(MacroExclusion::new(ExclusionKind::Languages)),
			Box::new(MacroExclusion::new(ExclusionKind::JdkLowerThan(jdk))),
			Box::new(DiffLink::new(config)),
			Box::new(SharedInclude::callout()),
			Box::new(SharedInclude::common()),
			Box::new(DependencyMacro),
			Box::new(IncludeMacro::new(IncludeKind::Source, config)),
			Box::new(IncludeMacro::new(IncludeKind::Test, config)),
			Box::new(IncludeMacro::new(IncludeKind::RawTest, config)),
			Box::new(IncludeMacro::new(IncludeKind::Resource, config)),
			Box::new(IncludeMacro::new(IncludeKind::TestResource, config)),
			Box::new(IncludeMacro::new(IncludeKind::ZipInclude, config)),
			Box::new(SnippetMacro::new(config)),
			Box::new(GuideLink),
			Box::new(CreateApp::new(config)),
			Box::new(GradleMavenCommand),
			Box::new(EnvironmentVars),
			Box::new(AppPlaceholder::new(AppPlaceholderKind::Features)),
			Box::new(AppPlaceholder::new(AppPlaceholderKind::FeaturesWords)),
			Box::new(AppPlaceholder::new(AppPlaceholderKind::CliCommand)),
			Box::new(VariantPlaceholders::new(config, jdk)),
		])
	}

	pub fn handlers(&self) -> impl Iterator<Item = &dyn MacroSubstitution> {
		self.handlers.iter().map(|handler| &**handler)
	}

	/// The handler expanding `name`, if any.
	pub fn handler(&self, name: &str) -> Option<&dyn MacroSubstitution> {
		self.handlers().find(|handler| handler.handles(name))
	}

	/// Expand every macro in `text` for the given guide variant.
	pub fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		self.handlers
			.iter()
			.try_fold(text.to_string(), |text, handler| {
				debug!(
					"applying `{}` to guide {} ({})",
					handler.name(),
					render.guide.slug,
					render.option
				);
				handler.substitute(&text, render)
			})
	}
}
