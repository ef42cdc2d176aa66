#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn guidegen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("guidegen"));
	cmd.env("NO_COLOR", "1")
		.env_remove("GUIDE")
		.env_remove("JDK_VERSION")
		.env_remove("RUST_LOG");
	cmd
}

pub const HELLO_DOCUMENT: &str =
	"= @guideTitle@\n\nsource:HelloController[]\n\nsnippet:HelloController[tags=class]\n";

pub const HELLO_CONTROLLER: &str = concat!(
	"package example.micronaut;\n",
	"\n",
	"// tag::class[]\n",
	"@Controller(\"/hello\")\n",
	"class HelloController {\n",
	"}\n",
	"// end::class[]\n",
);

/// Metadata accepted by the default schema, with a single gradle/java
/// variant.
pub fn metadata(title: &str) -> String {
	format!(
		r#"{{
  "title": "{title}",
  "intro": "Say hello from a controller.",
  "authors": ["Ada Lovelace"],
  "categories": ["Getting Started"],
  "publicationDate": "2024-04-24",
  "languages": ["java"],
  "buildTools": ["gradle"],
  "apps": [{{ "name": "default", "features": ["yaml"] }}]
}}"#
	)
}

pub fn write_file(path: &Path, content: &str) {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

pub fn write_guide(guides_dir: &Path, slug: &str, metadata: &str, document: Option<&str>) {
	let folder = guides_dir.join(slug);
	write_file(&folder.join("metadata.json"), metadata);
	if let Some(document) = document {
		write_file(&folder.join(format!("{slug}.adoc")), document);
	}
}

/// A project with a single guide that expands cleanly.
pub fn hello_project(root: &Path) {
	let guides_dir = root.join("guides");
	write_guide(&guides_dir, "hello", &metadata("Hello"), Some(HELLO_DOCUMENT));
	write_file(
		&guides_dir.join("hello/java/src/main/java/example/micronaut/HelloController.java"),
		HELLO_CONTROLLER,
	);
}

/// [`hello_project`] plus a guide referencing an undeclared app and an
/// unpublished draft.
pub fn mixed_project(root: &Path) {
	hello_project(root);
	let guides_dir = root.join("guides");
	write_guide(
		&guides_dir,
		"broken-app",
		&metadata("Broken"),
		Some("Uses @ghost:features@.\n"),
	);
	write_guide(
		&guides_dir,
		"unpublished",
		r#"{ "title": "Unpublished", "publish": false }"#,
		None,
	);
}
