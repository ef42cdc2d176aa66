use std::path::Path;

use chrono::NaiveDate;

use crate::App;
use crate::BuildTool;
use crate::Guide;
use crate::GuideRender;
use crate::GuidesOption;
use crate::Language;
use crate::TestFramework;

pub fn default_app() -> App {
	App {
		name: "default".to_string(),
		package_name: "example.micronaut".to_string(),
		..App::default()
	}
}

pub fn named_app(name: &str) -> App {
	App {
		name: name.to_string(),
		..default_app()
	}
}

/// A publishable guide with a single default app.
pub fn guide_with_slug(slug: &str) -> Guide {
	Guide {
		title: "Creating your first Micronaut application".to_string(),
		intro: "Learn how to create a Micronaut application.".to_string(),
		authors: vec!["Iván López".to_string(), "Sergio del Amo".to_string()],
		categories: vec!["Getting Started".to_string()],
		publication_date: NaiveDate::from_ymd_opt(2018, 5, 23),
		languages: Language::ALL.to_vec(),
		build_tools: vec![BuildTool::Gradle, BuildTool::Maven],
		slug: slug.to_string(),
		asciidoctor: Some(format!("{slug}.adoc")),
		apps: vec![default_app()],
		..Guide::default()
	}
}

pub fn gradle_java() -> GuidesOption {
	GuidesOption::new(BuildTool::Gradle, Language::Java, TestFramework::Junit)
}

pub fn maven_kotlin() -> GuidesOption {
	GuidesOption::new(BuildTool::Maven, Language::Kotlin, TestFramework::Junit)
}

pub fn gradle_groovy_spock() -> GuidesOption {
	GuidesOption::new(BuildTool::Gradle, Language::Groovy, TestFramework::Spock)
}

pub fn render(guide: &Guide, option: GuidesOption) -> GuideRender<'_> {
	GuideRender::new(guide, option)
}

/// The base guide of an inheritance chain.
pub fn base_guide() -> Guide {
	Guide {
		title: "Connect a Micronaut Data JDBC Application to Azure Database for MySQL".to_string(),
		intro: "Learn how to connect a Micronaut Data JDBC application to a Microsoft Azure \
		        Database for MySQL"
			.to_string(),
		authors: vec!["Graeme Rocher".to_string()],
		categories: vec!["Data JDBC".to_string()],
		publication_date: NaiveDate::from_ymd_opt(2022, 2, 17),
		tags: vec![
			"cloud".to_string(),
			"database".to_string(),
			"jdbc".to_string(),
			"micronaut-data".to_string(),
		],
		slug: "micronaut-data-jdbc-azure-mysql-base".to_string(),
		publish: false,
		apps: vec![App {
			name: "default".to_string(),
			package_name: "example.micronaut".to_string(),
			validate_license: false,
			..App::default()
		}],
		source_module: Some("base".to_string()),
		..Guide::default()
	}
}

/// A guide that only declares what differs from [`base_guide`].
pub fn child_guide() -> Guide {
	Guide {
		tags: vec![
			"Azure".to_string(),
			"data-jdbc".to_string(),
			"flyway".to_string(),
			"mysql".to_string(),
			"jdbc".to_string(),
		],
		slug: "micronaut-data-jdbc-azure-mysql".to_string(),
		base: Some("micronaut-data-jdbc-azure-mysql-base".to_string()),
		..Guide::default()
	}
}

/// Metadata accepted by the default schema.
pub fn metadata_json(title: &str) -> String {
	format!(
		r#"{{
  "title": "{title}",
  "intro": "Say hello from a controller.",
  "authors": ["Ada Lovelace"],
  "categories": ["Getting Started", "Getting Started"],
  "publicationDate": "2024-04-24",
  "languages": ["java"],
  "buildTools": ["gradle"],
  "tags": ["http", "http"],
  "apps": [{{ "name": "default", "features": ["yaml"] }}]
}}"#
	)
}

/// Write `content` to `path`, creating the parent directories.
pub fn write_file(path: &Path, content: &str) {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

/// Write a guide directory below `guides_dir`.
pub fn write_guide(guides_dir: &Path, slug: &str, metadata: &str, document: Option<&str>) {
	let folder = guides_dir.join(slug);
	write_file(&folder.join("metadata.json"), metadata);
	if let Some(document) = document {
		write_file(&folder.join(format!("{slug}.adoc")), document);
	}
}

pub const HELLO_CONTROLLER: &str = concat!(
	"package example.micronaut;\n",
	"\n",
	"import io.micronaut.http.annotation.Controller;\n",
	"\n",
	"// tag::class[]\n",
	"@Controller(\"/hello\")\n",
	"class HelloController {\n",
	"}\n",
	"// end::class[]\n",
);
