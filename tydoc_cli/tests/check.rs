mod common;

use serde_json::Value;
use tydoc_core::AnyEmptyResult;

#[test]
fn check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::tydoc_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_fails_when_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	std::fs::write(tmp.path().join("docs/widget.md"), "edited by hand\n")?;

	common::tydoc_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("out of date"))
		.stderr(predicates::str::contains("widget.md"));

	Ok(())
}

#[test]
fn check_fails_when_output_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("missing"));

	Ok(())
}

#[test]
fn check_diff_shows_expected_content() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	std::fs::write(tmp.path().join("docs/widget.md"), "edited by hand\n")?;

	common::tydoc_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("-edited by hand"))
		.stderr(predicates::str::contains("+# Widget"));

	Ok(())
}

#[test]
fn check_json_format_reports_stale_and_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	std::fs::write(tmp.path().join("docs/widget.md"), "edited by hand\n")?;
	std::fs::remove_file(tmp.path().join("docs/demo.md"))?;

	let output = common::tydoc_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.get_output()
		.stdout
		.clone();

	let value: Value = serde_json::from_slice(&output)?;
	assert_eq!(value["ok"], Value::Bool(false));
	assert_eq!(value["stale"][0]["file"], "widget.md");
	assert_eq!(value["missing"][0], "demo.md");

	Ok(())
}

#[test]
fn check_json_format_reports_clean_runs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let output = common::tydoc_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let value: Value = serde_json::from_slice(&output)?;
	assert_eq!(value["ok"], Value::Bool(true));

	Ok(())
}

#[test]
fn check_github_format_emits_annotations() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::tydoc_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	std::fs::write(tmp.path().join("docs/widget.md"), "edited by hand\n")?;
	std::fs::remove_file(tmp.path().join("docs/demo.md"))?;

	common::tydoc_cmd()
		.arg("check")
		.arg("--format")
		.arg("github")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stdout(predicates::str::contains(
			"::warning file=widget.md::Generated doc is out of date",
		))
		.stdout(predicates::str::contains(
			"::error file=demo.md::Generated doc is missing",
		));

	Ok(())
}

#[test]
fn check_without_config_fails_with_help() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::tydoc_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no config file found"));

	Ok(())
}
