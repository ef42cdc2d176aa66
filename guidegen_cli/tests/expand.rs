mod common;

use guidegen_core::AnyEmptyResult;

#[test]
fn expand_prints_first_variant() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	let output = common::guidegen_cmd()
		.arg("expand")
		.arg("--guide")
		.arg("hello")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout)?;
	let expected = "= Hello

[source,java]
.src/main/java/example/micronaut/HelloController.java
----
include::{sourceDir}/hello/hello-gradle-java/src/main/java/example/micronaut/HelloController.java[]
----

snippet:HelloController[tags=class]
";
	similar_asserts::assert_eq!(stdout, expected);

	Ok(())
}

#[test]
fn expand_diff_marks_changed_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("expand")
		.arg("--guide")
		.arg("hello")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("hello (gradle-java-junit)"))
		.stdout(predicates::str::contains("-= @guideTitle@"))
		.stdout(predicates::str::contains("+= Hello"))
		.stdout(predicates::str::contains(" snippet:HelloController[tags=class]"));

	Ok(())
}

#[test]
fn expand_rejects_missing_variant() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("expand")
		.arg("--guide")
		.arg("hello")
		.arg("--build")
		.arg("maven")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("has no variant"));

	Ok(())
}

#[test]
fn expand_rejects_unknown_language() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("expand")
		.arg("--guide")
		.arg("hello")
		.arg("--lang")
		.arg("scala")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("scala"));

	Ok(())
}

#[test]
fn expand_rejects_unknown_guide() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("expand")
		.arg("--guide")
		.arg("nope")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown guide"));

	Ok(())
}

#[test]
fn expand_requires_guide() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::hello_project(tmp.path());

	common::guidegen_cmd()
		.arg("expand")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("requires `--guide <SLUG>`"));

	Ok(())
}
