use tracing::debug;

use super::IncludeKind;
use super::IncludeMacro;
use super::Macro;
use super::MacroSubstitution;
use super::scanner::rewrite_macro_lines;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesResult;
use crate::paths;

/// Embeds part of a generated source class:
/// `snippet:HelloController[lines=3..10]` or
/// `snippet:HelloController[tags=imports,class]`.
///
/// The class is read from the generated variant under the render's output
/// directory. Without one the line is kept as written.
pub struct SnippetMacro {
	source: IncludeMacro,
}

impl SnippetMacro {
	pub fn new(config: &GuidesConfig) -> Self {
		Self {
			source: IncludeMacro::new(IncludeKind::Source, config),
		}
	}

	fn expand(&self, invocation: &Macro, render: &GuideRender<'_>) -> GuidesResult<Option<String>> {
		let Some(output_dir) = render.output_dir else {
			debug!(
				"no generated tree for guide {}, keeping `{}` as written",
				render.guide.slug,
				self.name()
			);
			return Ok(None);
		};
		let (file_name, relative_path) = self.source.locate(invocation, render);
		let path = output_dir
			.join(&render.guide.slug)
			.join(render.source_dir())
			.join(&relative_path);
		let content = std::fs::read_to_string(&path)?;

		let selected = if let Some(range) = invocation.attributes.value("lines") {
			select_lines(&content, range, &relative_path)?
		} else {
			let mut tags = invocation.attributes.values("tags");
			tags.extend(invocation.attributes.values("tag"));
			if tags.is_empty() {
				content
			} else {
				select_tags(&content, &tags, &relative_path)?
			}
		};

		Ok(Some(format!(
			"[source,{}]\n----\n{}\n----",
			paths::source_language(&file_name),
			selected.trim_end_matches('\n')
		)))
	}
}

impl MacroSubstitution for SnippetMacro {
	fn name(&self) -> &'static str {
		"snippet"
	}

	fn order(&self) -> i32 {
		46
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		rewrite_macro_lines(text, self.name(), |invocation| {
			self.expand(invocation, render)
		})
	}
}

/// Select the 1-based inclusive `start..end` lines of `content`. An end of
/// `-1` selects through the last line.
pub fn select_lines(content: &str, range: &str, target: &str) -> GuidesResult<String> {
	let invalid = || {
		GuidesError::InvalidLineRange {
			target: target.to_string(),
			range: range.to_string(),
		}
	};

	let (start, end) = range.split_once("..").ok_or_else(invalid)?;
	let start: usize = start.trim().parse().map_err(|_| invalid())?;
	let end: i64 = end.trim().parse().map_err(|_| invalid())?;
	let lines: Vec<&str> = content.lines().collect();
	let end = if end == -1 {
		lines.len()
	} else {
		usize::try_from(end).map_err(|_| invalid())?
	};

	if start == 0 || start > end || end > lines.len() {
		return Err(invalid());
	}

	let mut selected = lines[start - 1..end].join("\n");
	selected.push('\n');
	Ok(selected)
}

/// Select the regions between `tag::<tag>[]` and `end::<tag>[]` markers,
/// one tag after another. Marker lines are left out.
pub fn select_tags(content: &str, tags: &[String], target: &str) -> GuidesResult<String> {
	let mut selected = String::new();

	for tag in tags {
		let open = format!("tag::{tag}[");
		let close = format!("end::{tag}[");
		let mut found = false;
		let mut inside = false;

		for line in content.lines() {
			if line.contains(&open) {
				found = true;
				inside = true;
				continue;
			}
			if line.contains(&close) {
				inside = false;
				continue;
			}
			if inside {
				selected.push_str(line);
				selected.push('\n');
			}
		}

		if !found {
			return Err(GuidesError::MissingTag {
				target: target.to_string(),
				tag: tag.clone(),
			});
		}
	}

	Ok(selected)
}
