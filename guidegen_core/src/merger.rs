use std::collections::HashMap;

use tracing::warn;

use crate::Guide;
use crate::GuidesError;
use crate::GuidesResult;
use crate::parser::dedup_in_order;

/// Apply `base` inheritance to every guide of a parsed batch.
///
/// A base that itself has a base is resolved first. A base that is not part
/// of the batch leaves the guide unmerged with a warning, or fails when
/// `strict` is set. Inheritance cycles are left unmerged.
pub fn merge_guides(guides: &mut [Guide], strict: bool) -> GuidesResult<()> {
	let index: HashMap<String, usize> = guides
		.iter()
		.enumerate()
		.map(|(position, guide)| (guide.slug.clone(), position))
		.collect();

	let mut merged: Vec<Option<Guide>> = vec![None; guides.len()];
	for position in 0..guides.len() {
		let mut visiting = Vec::new();
		resolve(position, guides, &index, &mut merged, &mut visiting, strict)?;
	}

	for (guide, effective) in guides.iter_mut().zip(merged) {
		if let Some(effective) = effective {
			*guide = effective;
		}
	}

	Ok(())
}

fn resolve(
	position: usize,
	guides: &[Guide],
	index: &HashMap<String, usize>,
	merged: &mut [Option<Guide>],
	visiting: &mut Vec<usize>,
	strict: bool,
) -> GuidesResult<Guide> {
	if let Some(effective) = &merged[position] {
		return Ok(effective.clone());
	}

	let guide = &guides[position];
	let Some(base_slug) = guide.base.as_deref() else {
		merged[position] = Some(guide.clone());
		return Ok(guide.clone());
	};

	let Some(&base_position) = index.get(base_slug) else {
		if strict {
			return Err(GuidesError::UnknownBaseGuide {
				slug: guide.slug.clone(),
				base: base_slug.to_string(),
			});
		}
		warn!(
			"guide {} declares unknown base {base_slug}, leaving it unmerged",
			guide.slug
		);
		merged[position] = Some(guide.clone());
		return Ok(guide.clone());
	};

	if visiting.contains(&base_position) || base_position == position {
		warn!(
			"guide {} has a cyclic base chain through {base_slug}, leaving it unmerged",
			guide.slug
		);
		// Every guide on the cycle stays as authored.
		let start = visiting
			.iter()
			.position(|&visited| visited == base_position)
			.unwrap_or(visiting.len());
		for &member in visiting[start..].iter().chain([&position]) {
			merged[member] = Some(guides[member].clone());
		}
		return Ok(guide.clone());
	}

	visiting.push(position);
	let base = resolve(base_position, guides, index, merged, visiting, strict)?;
	visiting.pop();

	if let Some(effective) = &merged[position] {
		return Ok(effective.clone());
	}

	let effective = merge(&base, guide);
	merged[position] = Some(effective.clone());
	Ok(effective)
}

/// Overlay `child` on `base`.
///
/// Scalars come from the child when it sets them. Authors, categories,
/// languages, build tools, zip includes and apps come from the child unless
/// it leaves them empty. Tags are the union of both, base first. Identity
/// fields (slug, folder, base, publish, document) always come from the
/// child.
pub fn merge(base: &Guide, child: &Guide) -> Guide {
	let mut merged = child.clone();

	if merged.title.is_empty() {
		merged.title.clone_from(&base.title);
	}
	if merged.intro.is_empty() {
		merged.intro.clone_from(&base.intro);
	}
	merged.publication_date = child.publication_date.or(base.publication_date);
	merged.cloud = child.cloud.or(base.cloud);
	merged.minimum_java_version = child.minimum_java_version.or(base.minimum_java_version);
	merged.maximum_java_version = child.maximum_java_version.or(base.maximum_java_version);
	merged.test_framework = child.test_framework.or(base.test_framework);
	merged.base_source_module = child
		.base_source_module
		.clone()
		.or_else(|| base.source_module.clone());

	inherit_if_empty(&mut merged.authors, &base.authors);
	inherit_if_empty(&mut merged.categories, &base.categories);
	inherit_if_empty(&mut merged.languages, &base.languages);
	inherit_if_empty(&mut merged.build_tools, &base.build_tools);
	inherit_if_empty(&mut merged.zip_includes, &base.zip_includes);
	inherit_if_empty(&mut merged.apps, &base.apps);

	merged.tags = base.tags.iter().chain(&child.tags).cloned().collect();
	dedup_in_order(&mut merged.tags);

	let mut env = base.env.clone();
	env.extend(child.env.clone());
	merged.env = env;

	merged
}

fn inherit_if_empty<T: Clone>(target: &mut Vec<T>, inherited: &[T]) {
	if target.is_empty() {
		target.extend_from_slice(inherited);
	}
}
