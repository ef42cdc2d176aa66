use tracing::warn;

use super::MacroSubstitution;
use super::scanner::split_lines;
use crate::GuideRender;
use crate::GuidesResult;

/// What an exclusion block is conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionKind {
	/// `:exclude-for-build:gradle,maven`
	Build,
	/// `:exclude-for-languages:kotlin`
	Languages,
	/// `:exclude-for-jdk-lower-than:21`, against the resolved JDK.
	JdkLowerThan(u32),
}

/// Removes the block between `:<name>:<params>` and `:<name>:` when the
/// current variant matches the params. The marker lines are always
/// removed.
pub struct MacroExclusion {
	kind: ExclusionKind,
}

impl MacroExclusion {
	pub fn new(kind: ExclusionKind) -> Self {
		Self { kind }
	}

	fn should_exclude(&self, params: &[&str], render: &GuideRender<'_>) -> bool {
		match self.kind {
			ExclusionKind::Build => {
				let build_tool = render.build_tool().as_str();
				params.iter().any(|param| param.eq_ignore_ascii_case(build_tool))
			}
			ExclusionKind::Languages => {
				let language = render.language().as_str();
				params.iter().any(|param| param.eq_ignore_ascii_case(language))
			}
			ExclusionKind::JdkLowerThan(jdk) => {
				params
					.iter()
					.filter_map(|param| param.parse::<u32>().ok())
					.any(|required| jdk < required)
			}
		}
	}
}

impl MacroSubstitution for MacroExclusion {
	fn name(&self) -> &'static str {
		match self.kind {
			ExclusionKind::Build => "exclude-for-build",
			ExclusionKind::Languages => "exclude-for-languages",
			ExclusionKind::JdkLowerThan(_) => "exclude-for-jdk-lower-than",
		}
	}

	fn order(&self) -> i32 {
		match self.kind {
			ExclusionKind::Build => 0,
			ExclusionKind::Languages => 1,
			ExclusionKind::JdkLowerThan(_) => 2,
		}
	}

	fn substitute(&self, text: &str, render: &GuideRender<'_>) -> GuidesResult<String> {
		let marker = format!(":{}:", self.name());
		let mut output = String::with_capacity(text.len());
		// Where the open block starts in `text` and in `output`, and whether
		// its content is dropped.
		let mut open: Option<(usize, usize, bool)> = None;

		for (line, start, terminator) in split_lines(text) {
			let Some(params) = line.trim().strip_prefix(marker.as_str()) else {
				if !matches!(open, Some((_, _, true))) {
					output.push_str(line);
					output.push_str(terminator);
				}
				continue;
			};

			match open {
				None if !params.is_empty() => {
					let params: Vec<&str> = params.split(',').map(str::trim).collect();
					open = Some((start, output.len(), self.should_exclude(&params, render)));
				}
				Some(_) if params.is_empty() => open = None,
				Some((_, _, true)) => {}
				_ => {
					output.push_str(line);
					output.push_str(terminator);
				}
			}
		}

		if let Some((start, output_len, _)) = open {
			warn!(
				"unterminated `{marker}` block in guide {}, keeping it",
				render.guide.slug
			);
			output.truncate(output_len);
			output.push_str(&text[start..]);
		}

		Ok(output)
	}
}
