mod common;

use guidegen_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn build_writes_documents_and_code() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());
	let output = tmp.path().join("site");

	common::guidegen_cmd()
		.arg("build")
		.arg("--output")
		.arg(&output)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("hello-gradle-java.adoc"))
		.stdout(predicates::str::contains("1 document(s) written"));

	let document = std::fs::read_to_string(output.join("hello-gradle-java.adoc"))?;
	assert!(document.starts_with("= Hello\n"));
	assert!(document.contains("@Controller(\"/hello\")\nclass HelloController {\n}\n"));

	let variant = output.join("code/hello/hello-gradle-java");
	assert!(variant.join("src/main/java/example/micronaut/HelloController.java").is_file());

	let manifest: Value =
		serde_json::from_str(&std::fs::read_to_string(variant.join("project.json"))?)?;
	assert_eq!(manifest["name"], "example.micronaut.default");
	assert_eq!(manifest["buildTool"], "gradle");
	assert_eq!(manifest["language"], "java");
	assert_eq!(manifest["features"], serde_json::json!(["yaml"]));

	Ok(())
}

#[test]
fn build_summary_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	let output = common::guidegen_cmd()
		.arg("build")
		.arg("--output")
		.arg("site")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout)?;
	insta::with_settings!({ filters => vec![(r"written to .*site,", "written to [OUTPUT],")] }, {
		insta::assert_snapshot!(stdout, @r"
		Rendered:
		  ✓ hello-gradle-java.adoc

		1 document(s) written to [OUTPUT], 0 skipped, 0 failed
		");
	});

	Ok(())
}

#[test]
fn build_records_failures_and_skips() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::mixed_project(tmp.path());

	common::guidegen_cmd()
		.arg("build")
		.arg("--output")
		.arg("site")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("Skipped:"))
		.stdout(predicates::str::contains("unpublished"))
		.stdout(predicates::str::contains("1 skipped, 1 failed"))
		.stderr(predicates::str::contains("broken-app"));

	assert!(tmp.path().join("site/hello-gradle-java.adoc").is_file());

	Ok(())
}
