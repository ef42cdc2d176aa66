use chrono::NaiveDate;
use serde_json::Value;

use crate::SchemaConfig;

/// Every key guide metadata may hold.
pub const METADATA_KEYS: [&str; 24] = [
	"title",
	"intro",
	"authors",
	"categories",
	"publicationDate",
	"cloud",
	"tags",
	"languages",
	"buildTools",
	"testFramework",
	"skipGradleTests",
	"skipMavenTests",
	"minimumJavaVersion",
	"maximumJavaVersion",
	"asciidoctor",
	"publish",
	"slug",
	"zipIncludes",
	"base",
	"env",
	"apps",
	"sourceModule",
	"baseSourceModule",
	"$schema",
];

/// Check raw guide metadata against the configured schema and return every
/// violation found.
///
/// Guides with a `base` inherit most fields, so required keys are only
/// enforced on guides without one.
pub fn validate_metadata(value: &Value, schema: &SchemaConfig) -> Vec<String> {
	let Some(object) = value.as_object() else {
		return vec!["metadata must be a JSON object".to_string()];
	};

	let mut violations = Vec::new();

	if !object.contains_key("base") {
		for key in &schema.required {
			match object.get(key) {
				None | Some(Value::Null) => violations.push(format!("missing required key `{key}`")),
				Some(Value::String(text)) if text.trim().is_empty() => {
					violations.push(format!("required key `{key}` is empty"));
				}
				Some(Value::Array(items)) if items.is_empty() => {
					violations.push(format!("required key `{key}` is empty"));
				}
				Some(_) => {}
			}
		}
	}

	if !schema.allow_unknown_keys {
		let mut unknown: Vec<&String> = object
			.keys()
			.filter(|key| !METADATA_KEYS.contains(&key.as_str()))
			.collect();
		unknown.sort();
		violations.extend(unknown.into_iter().map(|key| format!("unknown key `{key}`")));
	}

	if let Some(date) = object.get("publicationDate").and_then(Value::as_str) {
		if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
			violations.push(format!("`publicationDate` is not a YYYY-MM-DD date: `{date}`"));
		}
	}

	violations
}
