use logos::Logos;

use super::MacroSubstitution;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesResult;

/// Raw tokens of markup text as seen by the placeholder rewriter.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum TextToken {
	#[regex(r"@[A-Za-z][A-Za-z0-9_-]*(:[A-Za-z][A-Za-z0-9_-]*)?@")]
	Placeholder,
	#[regex(r"[^@]+")]
	Text,
	#[token("@")]
	At,
}

/// An `@name@` or `@qualifier:name@` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
	pub qualifier: Option<&'a str>,
	pub name: &'a str,
}

impl<'a> Placeholder<'a> {
	fn from_slice(slice: &'a str) -> Self {
		let inner = &slice[1..slice.len() - 1];
		match inner.split_once(':') {
			Some((qualifier, name)) => {
				Self {
					qualifier: Some(qualifier),
					name,
				}
			}
			None => {
				Self {
					qualifier: None,
					name: inner,
				}
			}
		}
	}
}

/// Rewrite placeholders in one pass over `text`. `replace` returns `None`
/// to keep a placeholder as written.
pub fn rewrite_placeholders<F>(text: &str, mut replace: F) -> GuidesResult<String>
where
	F: FnMut(&Placeholder<'_>) -> GuidesResult<Option<String>>,
{
	let mut output = String::with_capacity(text.len());
	let mut lexer = TextToken::lexer(text);

	while let Some(token) = lexer.next() {
		let slice = lexer.slice();
		if token == Ok(TextToken::Placeholder) {
			if let Some(replacement) = replace(&Placeholder::from_slice(slice))? {
				output.push_str(&replacement);
				continue;
			}
		}
		output.push_str(slice);
	}

	Ok(output)
}

/// Every placeholder in `text`, in document order.
pub fn find_placeholders(text: &str) -> Vec<Placeholder<'_>> {
	let mut lexer = TextToken::lexer(text);
	let mut placeholders = Vec::new();
	while let Some(token) = lexer.next() {
		if token == Ok(TextToken::Placeholder) {
			placeholders.push(Placeholder::from_slice(lexer.slice()));
		}
	}
	placeholders
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPlaceholderKind {
	/// `@app:features@`, the comma separated feature list.
	Features,
	/// `@app:features-words@`, the visible features as prose.
	FeaturesWords,
	/// `@app:cli-command@`, the `mn` command creating the app.
	CliCommand,
}

/// Placeholders qualified by an app name. The app must be declared.
pub struct AppPlaceholder {
	kind: AppPlaceholderKind,
}

impl AppPlaceholder {
	pub fn new(kind: AppPlaceholderKind) -> Self {
		Self { kind }
	}
}

impl MacroSubstitution for AppPlaceholder {
	fn name(&self) -> &'static str {
		match self.kind {
			AppPlaceholderKind::Features => "features",
			AppPlaceholderKind::FeaturesWords => "features-words",
			AppPlaceholderKind::CliCommand => "cli-command",
		}
	}

	fn order(&self) -> i32 {
		match self.kind {
			AppPlaceholderKind::Features => 70,
			AppPlaceholderKind::FeaturesWords => 71,
			AppPlaceholderKind::CliCommand => 72,
		}
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_placeholders(text, |placeholder| {
			let Some(app_name) = placeholder.qualifier else {
				return Ok(None);
			};
			if placeholder.name != self.name() {
				return Ok(None);
			}

			let app = render.guide.require_app(app_name, self.name())?;
			let language = render.language();
			let replacement = match self.kind {
				AppPlaceholderKind::Features => app.features(language).join(","),
				AppPlaceholderKind::FeaturesWords => features_words(&app.visible_features(language)),
				AppPlaceholderKind::CliCommand => app.application_type.cli_command().to_string(),
			};

			Ok(Some(replacement))
		})
	}
}

/// Join features as backticked prose: "`a`, `b`, and `c`".
pub fn features_words(features: &[String]) -> String {
	let words: Vec<String> = features
		.iter()
		.map(|feature| format!("`{feature}`"))
		.collect();

	match words.as_slice() {
		[] => String::new(),
		[single] => single.clone(),
		[init @ .., last] => format!("{}, and {last}", init.join(", ")),
	}
}

/// Unqualified placeholders describing the guide and its variant.
pub struct VariantPlaceholders {
	api_url: String,
	jdk: u32,
}

impl VariantPlaceholders {
	pub fn new(config: &GuidesConfig, jdk: u32) -> Self {
		Self {
			api_url: config.api_url.clone(),
			jdk,
		}
	}

	fn value(&self, name: &str, render: &GuideRender<'_>) -> Option<String> {
		let guide = render.guide;
		let value = match name {
			"lang" => render.language().to_string(),
			"build" => render.build_tool().to_string(),
			"testFramework" => render.test_framework().to_string(),
			"languageextension" => render.language().extension().to_string(),
			"testsuffix" => render.test_framework().test_suffix().to_string(),
			"sourceDir" => render.source_dir(),
			"guideTitle" => guide.title.clone(),
			"guideIntro" => guide.intro.clone(),
			"authors" => guide.authors.join(", "),
			"minJdk" => guide.minimum_java_version.unwrap_or(self.jdk).to_string(),
			"api" => self.api_url.clone(),
			_ => return None,
		};
		Some(value)
	}
}

impl MacroSubstitution for VariantPlaceholders {
	fn name(&self) -> &'static str {
		"variant-placeholders"
	}

	fn order(&self) -> i32 {
		80
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_placeholders(text, |placeholder| {
			if placeholder.qualifier.is_some() {
				return Ok(None);
			}
			Ok(self.value(placeholder.name, render))
		})
	}
}
