use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GuidesError {
	#[error(transparent)]
	#[diagnostic(code(guidegen::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(guidegen::config_parse),
		help("check that guidegen.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("guides directory not found: `{0}`")]
	#[diagnostic(
		code(guidegen::guides_dir_not_found),
		help("set `guides_dir` in guidegen.toml or pass `--path` to the project root")
	)]
	GuidesDirNotFound(String),

	#[error("failed to parse guide metadata `{path}`: {reason}")]
	#[diagnostic(code(guidegen::metadata_parse))]
	MetadataParse { path: String, reason: String },

	#[error("guide metadata `{path}` does not satisfy the schema: {}", .reasons.join("; "))]
	#[diagnostic(
		code(guidegen::schema_violation),
		help("add the missing keys or remove unknown ones from metadata.json")
	)]
	SchemaViolation { path: String, reasons: Vec<String> },

	#[error("guide `{slug}` declares unknown base guide `{base}`")]
	#[diagnostic(
		code(guidegen::unknown_base_guide),
		help("`base` must name the slug of another guide in the same guides directory")
	)]
	UnknownBaseGuide { slug: String, base: String },

	#[error("unknown guide: `{0}`")]
	#[diagnostic(
		code(guidegen::unknown_guide),
		help("run `guidegen list` to see the available guides")
	)]
	UnknownGuide(String),

	#[error("guide `{slug}` has no variant for build tool `{build_tool}` and language `{language}`")]
	#[diagnostic(code(guidegen::unknown_variant))]
	UnknownVariant {
		slug: String,
		build_tool: String,
		language: String,
	},

	#[error("app `{app}` referenced by `{macro_name}` is not declared in guide `{slug}`")]
	#[diagnostic(
		code(guidegen::unknown_app),
		help("declared apps: {available}")
	)]
	UnknownApp {
		slug: String,
		app: String,
		macro_name: String,
		available: String,
	},

	#[error("unknown {kind}: `{value}`")]
	#[diagnostic(code(guidegen::unknown_value))]
	UnknownValue { kind: String, value: String },

	#[error("missing asciidoc document for guide `{slug}`: `{path}`")]
	#[diagnostic(
		code(guidegen::missing_document),
		help("create the file or set `asciidoctor` in metadata.json")
	)]
	MissingDocument { slug: String, path: String },

	#[error("invalid line range `{range}` in `{target}`")]
	#[diagnostic(
		code(guidegen::invalid_line_range),
		help("use `lines=<start>..<end>` with 1-based line numbers, `-1` for the last line")
	)]
	InvalidLineRange { target: String, range: String },

	#[error("tag `{tag}` not found in `{target}`")]
	#[diagnostic(
		code(guidegen::missing_tag),
		help("surround the region with `tag::{tag}[]` and `end::{tag}[]` comments")
	)]
	MissingTag { target: String, tag: String },

	#[error("invalid jdk version in `{variable}`: `{value}`")]
	#[diagnostic(
		code(guidegen::invalid_jdk_version),
		help("set the variable to a major version such as 17 or 21")
	)]
	InvalidJdkVersion { variable: String, value: String },

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(guidegen::template_render))]
	TemplateRender(String),

	#[error("project generation failed for `{slug}`: {reason}")]
	#[diagnostic(code(guidegen::project_generation))]
	ProjectGeneration { slug: String, reason: String },

	#[error("document conversion failed for `{slug}`: {reason}")]
	#[diagnostic(code(guidegen::conversion))]
	Conversion { slug: String, reason: String },
}

pub type GuidesResult<T> = Result<T, GuidesError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
