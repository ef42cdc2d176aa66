use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use tracing::trace;
use tracing::warn;

use crate::Guide;
use crate::GuidesConfig;
use crate::GuidesError;
use crate::GuidesResult;
use crate::merger::merge_guides;
use crate::schema::validate_metadata;

/// Parse every guide below `guides_dir`, apply `base` inheritance and fill
/// in defaults.
///
/// Guides whose metadata cannot be read, parsed or validated are skipped
/// with a log entry. The result is sorted by guide directory.
pub fn parse_guides_metadata(guides_dir: &Path, config: &GuidesConfig) -> GuidesResult<Vec<Guide>> {
	if !guides_dir.is_dir() {
		return Err(GuidesError::GuidesDirNotFound(
			guides_dir.display().to_string(),
		));
	}

	let mut dirs = Vec::new();
	find_guide_dirs(guides_dir, &config.metadata_file, &mut dirs)?;
	dirs.sort();

	let mut slugs = HashSet::new();
	let mut guides = Vec::new();
	for dir in dirs {
		let Some(guide) = parse_guide_metadata(&dir, config) else {
			continue;
		};
		if !slugs.insert(guide.slug.clone()) {
			warn!(
				"duplicate guide slug `{}` in {}, skipping",
				guide.slug,
				dir.display()
			);
			continue;
		}
		guides.push(guide);
	}

	merge_guides(&mut guides, config.strict_base)?;

	for guide in &mut guides {
		populate_defaults(guide, config);
	}

	Ok(guides)
}

/// Read, validate and deserialize the metadata of one guide directory.
///
/// The returned guide carries its folder and a slug, which falls back to the
/// directory name. No other defaults are applied.
pub fn parse_guide_metadata(dir: &Path, config: &GuidesConfig) -> Option<Guide> {
	let path = dir.join(&config.metadata_file);
	match read_guide(dir, &path, config) {
		Ok(guide) => Some(guide),
		Err(error) => {
			trace!("skipping guide {}: {error}", path.display());
			warn!("skipping guide {}", dir.display());
			None
		}
	}
}

fn read_guide(dir: &Path, path: &Path, config: &GuidesConfig) -> GuidesResult<Guide> {
	let content = std::fs::read_to_string(path)?;
	let value: serde_json::Value =
		serde_json::from_str(&content).map_err(|e| metadata_error(path, &e))?;

	let publish = value
		.get("publish")
		.and_then(serde_json::Value::as_bool)
		.unwrap_or(true);
	if config.validate_metadata && publish {
		let reasons = validate_metadata(&value, &config.schema);
		if !reasons.is_empty() {
			return Err(GuidesError::SchemaViolation {
				path: path.display().to_string(),
				reasons,
			});
		}
	}

	let mut guide: Guide = serde_json::from_value(value).map_err(|e| metadata_error(path, &e))?;
	guide.folder = dir.to_path_buf();
	if guide.slug.is_empty() {
		guide.slug = directory_name(dir);
	}

	Ok(guide)
}

fn metadata_error(path: &Path, error: &serde_json::Error) -> GuidesError {
	GuidesError::MetadataParse {
		path: path.display().to_string(),
		reason: error.to_string(),
	}
}

fn directory_name(dir: &Path) -> String {
	dir.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default()
}

/// Fill in everything a guide leaves unset. Runs after `base` inheritance.
pub fn populate_defaults(guide: &mut Guide, config: &GuidesConfig) {
	if guide.languages.is_empty() {
		guide.languages.clone_from(&config.default_languages);
	}
	if guide.build_tools.is_empty() {
		guide.build_tools.clone_from(&config.default_build_tools);
	}
	if guide.slug.is_empty() {
		guide.slug = directory_name(&guide.folder);
	}

	if guide.publish && guide.asciidoctor.is_none() {
		guide.asciidoctor = Some(format!("{}.adoc", guide.slug));
	}

	for app in &mut guide.apps {
		if app.name.trim().is_empty() {
			app.name.clone_from(&config.default_app_name);
		}
		if app.package_name.trim().is_empty() {
			app.package_name.clone_from(&config.package_name);
		}
	}

	dedup_in_order(&mut guide.categories);
	dedup_in_order(&mut guide.tags);
}

/// Remove repeated entries, keeping the first occurrence.
pub(crate) fn dedup_in_order(items: &mut Vec<String>) {
	let mut seen = HashSet::new();
	items.retain(|item| seen.insert(item.clone()));
}

/// Recursively collect directories holding a `metadata_file`.
fn find_guide_dirs(dir: &Path, metadata_file: &str, dirs: &mut Vec<PathBuf>) -> GuidesResult<()> {
	if dir.join(metadata_file).is_file() {
		dirs.push(dir.to_path_buf());
	}

	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if name.starts_with('.') || name == "build" || name == "target" {
				continue;
			}
		}

		if path.is_dir() {
			find_guide_dirs(&path, metadata_file, dirs)?;
		}
	}

	Ok(())
}
