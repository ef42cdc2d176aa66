use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::warn;

use crate::DocumentConverter;
use crate::Guide;
use crate::GuideRender;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesOption;
use crate::GuidesResult;
use crate::ProjectGenerator;
use crate::generation_requests;
use crate::jdk_version_for;
use crate::macros::MacroPipeline;
use crate::parse_guides_metadata;
use crate::process;
use crate::render_attributes;
use crate::render_options;
use crate::transfer_files;
use crate::variant_root;

/// Directory below the output root that holds the generated example code.
pub const CODE_DIR: &str = "code";

/// Parse every guide of the project rooted at `root`.
pub fn load_guides(root: &Path, config: &GuidesConfig) -> GuidesResult<Vec<Guide>> {
	parse_guides_metadata(&config.guides_path(root), config)
}

/// Read the markup document of a guide.
pub fn read_document(guide: &Guide) -> GuidesResult<String> {
	let missing = |path: Option<&PathBuf>| {
		GuidesError::MissingDocument {
			slug: guide.slug.clone(),
			path: path.map(|path| path.display().to_string()).unwrap_or_default(),
		}
	};

	let path = guide.asciidoc_path().ok_or_else(|| missing(None))?;
	if !path.is_file() {
		return Err(missing(Some(&path)));
	}

	Ok(std::fs::read_to_string(&path)?)
}

/// Expand the markup of `guide` for one variant.
pub fn expand_guide(
	guide: &Guide,
	option: GuidesOption,
	pipeline: &MacroPipeline,
	code_dir: Option<&Path>,
) -> GuidesResult<String> {
	let markup = read_document(guide)?;
	let mut render = GuideRender::new(guide, option);
	if let Some(code_dir) = code_dir {
		render = render.with_output_dir(code_dir);
	}
	pipeline.substitute(&markup, &render)
}

/// A guide that could not be rendered.
#[derive(Debug)]
pub struct GuideFailure {
	pub slug: String,
	pub error: GuidesError,
}

/// Outcome of a dry expansion of every variant of every processed guide.
#[derive(Debug, Default)]
pub struct CheckReport {
	/// Slug and number of variants of each guide that expanded cleanly.
	pub passed: Vec<(String, usize)>,
	pub failures: Vec<GuideFailure>,
}

impl CheckReport {
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Expand every variant of every guide `process` accepts, without writing
/// anything. Embedded snippets are left as written.
pub fn check_guides(
	guides: &[Guide],
	pipeline: &MacroPipeline,
	config: &GuidesConfig,
	jdk: u32,
) -> CheckReport {
	let mut report = CheckReport::default();

	for guide in guides.iter().filter(|guide| process(guide, false, config, jdk)) {
		let options = render_options(guide);
		let result = options
			.iter()
			.try_for_each(|&option| expand_guide(guide, option, pipeline, None).map(drop));

		match result {
			Ok(()) => report.passed.push((guide.slug.clone(), options.len())),
			Err(error) => {
				report.failures.push(GuideFailure {
					slug: guide.slug.clone(),
					error,
				});
			}
		}
	}

	report
}

/// Outcome of a website run.
#[derive(Debug, Default)]
pub struct WebsiteReport {
	/// Every document written, relative to the output directory.
	pub rendered: Vec<PathBuf>,
	pub failures: Vec<GuideFailure>,
	/// Slugs of guides `process` rejected.
	pub skipped: Vec<String>,
}

/// Drives generation of the whole website: example projects, transferred
/// sources and one converted document per guide variant.
pub struct WebsiteGenerator<'a> {
	config: &'a GuidesConfig,
	pipeline: MacroPipeline,
	converter: &'a dyn DocumentConverter,
	generator: &'a dyn ProjectGenerator,
	jdk: u32,
}

impl<'a> WebsiteGenerator<'a> {
	pub fn new(
		config: &'a GuidesConfig,
		converter: &'a dyn DocumentConverter,
		generator: &'a dyn ProjectGenerator,
		jdk: u32,
	) -> Self {
		Self {
			config,
			pipeline: MacroPipeline::with_defaults(config, jdk),
			converter,
			generator,
			jdk,
		}
	}

	/// Render every guide of the project at `root` into `output`.
	///
	/// A guide that fails is recorded and the run continues with the next
	/// one. Only failures to parse the guides abort the run.
	pub fn generate(&self, root: &Path, output: &Path) -> GuidesResult<WebsiteReport> {
		let guides = load_guides(root, self.config)?;
		let mut report = WebsiteReport::default();

		for guide in &guides {
			if !process(guide, true, self.config, self.jdk) {
				report.skipped.push(guide.slug.clone());
				continue;
			}

			match self.render_guide(guide, &guides, root, output) {
				Ok(rendered) => report.rendered.extend(rendered),
				Err(error) => {
					warn!("failed to render guide {}: {error}", guide.slug);
					report.failures.push(GuideFailure {
						slug: guide.slug.clone(),
						error,
					});
				}
			}
		}

		Ok(report)
	}

	/// Generate, transfer and convert every variant of one guide. The
	/// converter resolves relative references against `root`.
	pub fn render_guide(
		&self,
		guide: &Guide,
		guides: &[Guide],
		root: &Path,
		output: &Path,
	) -> GuidesResult<Vec<PathBuf>> {
		let markup = read_document(guide)?;
		let code_dir = output.join(CODE_DIR);
		let jdk = jdk_version_for(guide, self.jdk);
		let mut rendered = Vec::new();

		for option in render_options(guide) {
			let variant_dir = variant_root(&code_dir, guide, &option);
			if !guide.apps.is_empty() {
				for request in generation_requests(guide, &option, self.config, jdk) {
					let destination =
						variant_dir.join(request.app_folder.as_deref().unwrap_or_default());
					self.generator.generate(&request, &destination)?;
				}
				transfer_files(guide, guides, &option, &code_dir, self.config)?;
			}

			let render = GuideRender::new(guide, option).with_output_dir(&code_dir);
			let expanded = self.pipeline.substitute(&markup, &render)?;
			let attributes = render_attributes(&render, &code_dir, &variant_dir);
			let document = self.converter.convert(&expanded, root, &attributes)?;

			let file_name = PathBuf::from(format!(
				"{}.{}",
				render.source_dir(),
				self.converter.extension()
			));
			std::fs::create_dir_all(output)?;
			std::fs::write(output.join(&file_name), document)?;
			info!("rendered guide {} ({option})", guide.slug);
			rendered.push(file_name);
		}

		Ok(rendered)
	}
}
