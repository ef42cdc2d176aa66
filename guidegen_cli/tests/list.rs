mod common;

use guidegen_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;

#[test]
fn list_shows_guides_and_variants() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Guides:"))
		.stdout(predicates::str::contains("hello Hello (1 variant(s))"))
		.stdout(predicates::str::contains("    gradle-java-junit"))
		.stdout(predicates::str::contains("[draft]"))
		.stdout(predicates::str::contains("3 guide(s)"));

	Ok(())
}

#[test]
fn list_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	let output = common::guidegen_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let value: Value = serde_json::from_slice(&output.stdout)?;
	let expected = serde_json::json!([{
		"slug": "hello",
		"title": "Hello",
		"publish": true,
		"variants": ["gradle-java-junit"],
	}]);
	similar_asserts::assert_eq!(value, expected);

	Ok(())
}

#[test]
fn list_honors_single_guide() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.arg("list")
		.arg("--guide")
		.arg("broken-app")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("broken-app"))
		.stdout(predicates::str::contains("hello Hello").not())
		.stdout(predicates::str::contains("1 guide(s)"));

	Ok(())
}

#[test]
fn list_reads_guide_from_environment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.env("GUIDE", "hello")
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("broken-app").not())
		.stdout(predicates::str::contains("1 guide(s)"));

	Ok(())
}

#[test]
fn list_fails_without_guides_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::guidegen_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("guides directory not found"));

	Ok(())
}

#[test]
fn no_subcommand_prints_usage_hint() {
	common::guidegen_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
