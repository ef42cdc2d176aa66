//! Copies a guide's own sources into its generated variant trees.
//!
//! A guide folder holds, per app, a `src` tree shared by every language and
//! one tree per language (`java/`, `kotlin/`, `groovy/`). Single-app guides
//! keep these directly in the guide folder; multi-app guides nest them in a
//! folder per app.

use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::WalkBuilder;
use tracing::debug;
use tracing::warn;

use crate::App;
use crate::Guide;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesOption;
use crate::GuidesResult;
use crate::paths;

/// Exclusion entry that drops a whole language tree.
pub const EXCLUDE_ALL: &str = "all";

/// Root of the generated tree of one variant below `code_dir`.
pub fn variant_root(code_dir: &Path, guide: &Guide, option: &GuidesOption) -> PathBuf {
	code_dir
		.join(&guide.slug)
		.join(paths::source_dir(&guide.slug, option))
}

/// Copy the sources of `guide` (and of its base guide first) into the
/// variant tree for `option`, then apply the app exclusions and copy the
/// zip includes.
pub fn transfer_files(
	guide: &Guide,
	guides: &[Guide],
	option: &GuidesOption,
	code_dir: &Path,
	config: &GuidesConfig,
) -> GuidesResult<()> {
	let root = variant_root(code_dir, guide, option);
	let module = guide.source_module.as_deref().unwrap_or_default();

	for app in &guide.apps {
		let app_folder = paths::app_folder(guide, app).unwrap_or_default();
		let destination = root.join(app_folder).join(module);

		if let Some(base) = guide
			.base
			.as_deref()
			.and_then(|slug| guides.iter().find(|candidate| candidate.slug == slug))
		{
			let base_module = guide.base_source_module.as_deref().unwrap_or(module);
			copy_guide_sources(
				&base.folder.join(app_folder),
				&root.join(app_folder).join(base_module),
				option,
			)?;
		}

		copy_guide_sources(&guide.folder.join(app_folder), &destination, option)?;
		apply_exclusions(app, &destination, option)?;
	}

	copy_zip_includes(guide, &root, config)?;

	Ok(())
}

fn copy_guide_sources(source: &Path, destination: &Path, option: &GuidesOption) -> GuidesResult<()> {
	let shared = source.join("src");
	if shared.is_dir() {
		copy_tree(&shared, &destination.join("src"))?;
	}

	let language = source.join(option.language.as_str());
	if language.is_dir() {
		copy_tree(&language, destination)?;
	} else {
		debug!("no {} sources in {}", option.language, source.display());
	}

	Ok(())
}

/// Remove the files an app excludes from its generated tree.
pub fn apply_exclusions(app: &App, destination: &Path, option: &GuidesOption) -> GuidesResult<()> {
	let language = option.language.as_str();

	for (entries, classpath) in [(&app.exclude_source, "main"), (&app.exclude_test, "test")] {
		for entry in entries {
			if entry == EXCLUDE_ALL {
				let tree = destination.join("src").join(classpath).join(language);
				if tree.is_dir() {
					std::fs::remove_dir_all(&tree)?;
				}
				continue;
			}

			let relative = if classpath == "main" {
				paths::main_path(app, entry, option)
			} else {
				paths::test_path(app, entry, option)
			};
			let file = destination.join(relative);
			if file.is_file() {
				std::fs::remove_file(&file)?;
			} else {
				warn!("File {} to delete does not exist", file.display());
			}
		}
	}

	Ok(())
}

fn copy_zip_includes(guide: &Guide, root: &Path, config: &GuidesConfig) -> GuidesResult<()> {
	for include in &guide.zip_includes {
		let source = guide.folder.join(include);
		if source.is_file() {
			copy_file(&source, &root.join(include))?;
		} else {
			warn!("zip include {} does not exist", source.display());
		}
	}

	if !guide.folder.is_dir() {
		return Ok(());
	}

	let matcher = extension_matcher(&config.zip_includes_extensions)?;
	for entry in std::fs::read_dir(&guide.folder)? {
		let path = entry?.path();
		let Some(name) = path.file_name() else {
			continue;
		};
		if path.is_file() && matcher.is_match(name) {
			copy_file(&path, &root.join(name))?;
		}
	}

	Ok(())
}

fn extension_matcher(extensions: &[String]) -> GuidesResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for extension in extensions {
		let pattern = format!("*{extension}");
		let glob = Glob::new(&pattern).map_err(|e| {
			GuidesError::ConfigParse(format!("invalid zip include extension `{extension}`: {e}"))
		})?;
		builder.add(glob);
	}
	builder
		.build()
		.map_err(|e| GuidesError::ConfigParse(format!("failed to build zip include rules: {e}")))
}

/// Copy every file below `source` into `destination`, honoring ignore
/// files and skipping hidden entries.
fn copy_tree(source: &Path, destination: &Path) -> GuidesResult<()> {
	for entry in WalkBuilder::new(source).require_git(false).build() {
		let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
		let path = entry.path();
		if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
			continue;
		}
		let Ok(relative) = path.strip_prefix(source) else {
			continue;
		};
		copy_file(path, &destination.join(relative))?;
	}

	Ok(())
}

fn copy_file(source: &Path, destination: &Path) -> GuidesResult<()> {
	if let Some(parent) = destination.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::copy(source, destination)?;
	Ok(())
}
