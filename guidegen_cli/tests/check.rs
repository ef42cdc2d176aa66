mod common;

use guidegen_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn check_passes_when_every_variant_expands() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: 1 guide(s), 1 variant(s) expanded.",
		));

	Ok(())
}

#[test]
fn check_fails_on_unknown_app() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed."))
		.stderr(predicates::str::contains("failed guides: 1"))
		.stderr(predicates::str::contains("broken-app"))
		.stderr(predicates::str::contains("ghost"));

	Ok(())
}

#[test]
fn check_json_reports_failures() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	let output = common::guidegen_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["ok"], false);
	assert_eq!(value["passed"][0]["guide"], "hello");
	assert_eq!(value["passed"][0]["variants"], 1);
	assert_eq!(value["failures"][0]["guide"], "broken-app");

	Ok(())
}

#[test]
fn check_only_the_selected_guide() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.arg("check")
		.arg("--guide")
		.arg("hello")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_rejects_invalid_jdk_version() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.env("JDK_VERSION", "seventeen")
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid jdk version"));

	Ok(())
}
