//! Naming and path conventions shared by the macro handlers and the file
//! transfer.

use crate::App;
use crate::Guide;
use crate::GuidesOption;
use crate::Language;

/// Which half of a source tree a file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classpath {
	Main,
	Test,
}

impl Classpath {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Main => "main",
			Self::Test => "test",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
	Code,
	Resource,
}

/// Directory name of a generated variant: `<slug>-<build>-<language>`.
pub fn source_dir(slug: &str, option: &GuidesOption) -> String {
	format!("{slug}-{}-{}", option.build_tool, option.language).to_lowercase()
}

/// Package name as a relative directory path.
pub fn package_path(package_name: &str) -> String {
	package_name.replace('.', "/")
}

/// Path of a main source file, relative to the app root.
pub fn main_path(app: &App, file_name: &str, option: &GuidesOption) -> String {
	code_path(app, file_name, Classpath::Main, option.language)
}

/// Path of a test source file, relative to the app root.
pub fn test_path(app: &App, file_name: &str, option: &GuidesOption) -> String {
	code_path(app, file_name, Classpath::Test, option.language)
}

fn code_path(app: &App, file_name: &str, classpath: Classpath, language: Language) -> String {
	let mut path = format!("src/{}/{}/", classpath.as_str(), language.as_str());
	if !app.package_name.is_empty() {
		path.push_str(&package_path(&app.package_name));
		path.push('/');
	}
	path.push_str(file_name);
	path.push('.');
	path.push_str(language.extension());
	path
}

/// The relative path shown in a listing title. The `<app>/` prefix is left
/// out for the default app.
pub fn source_title(
	default_app_name: &str,
	app_name: &str,
	target: &str,
	classpath: Classpath,
	file_type: FileType,
	language: Language,
	package_name: &str,
) -> String {
	let mut title = String::new();
	if app_name != default_app_name {
		title.push_str(app_name);
		title.push('/');
	}

	title.push_str("src/");
	title.push_str(classpath.as_str());
	title.push('/');

	match file_type {
		FileType::Code => {
			title.push_str(language.as_str());
			title.push('/');
			if !package_name.is_empty() {
				title.push_str(&package_path(package_name));
				title.push('/');
			}
		}
		FileType::Resource => title.push_str("resources/"),
	}

	title.push_str(target);
	title
}

/// Folder of an app inside a generated variant. Only guides with several
/// apps nest each app in its own folder.
pub fn app_folder<'a>(guide: &Guide, app: &'a App) -> Option<&'a str> {
	(guide.apps.len() > 1).then_some(app.name.as_str())
}

/// Collapse `.` and `..` segments of a relative path. Leading `..`
/// segments that climb above the start are dropped.
pub fn normalize_relative(path: &str) -> String {
	let mut segments: Vec<&str> = Vec::new();
	for segment in path.split('/') {
		match segment {
			"" | "." => {}
			".." => {
				segments.pop();
			}
			segment => segments.push(segment),
		}
	}
	segments.join("/")
}

/// The listing language of a file, derived from its extension.
pub fn source_language(file_name: &str) -> String {
	let extension = file_name
		.rsplit_once('.')
		.map_or("", |(_, extension)| extension);

	match extension {
		"yml" | "yaml" => "yaml".to_string(),
		"kt" | "kts" => "kotlin".to_string(),
		"sh" | "bash" => "sh".to_string(),
		"md" => "markdown".to_string(),
		"" => "txt".to_string(),
		other => other.to_lowercase(),
	}
}
