use std::path::Path;

use assert_cmd::Command;
use tydoc_core::AnyEmptyResult;

pub fn tydoc_cmd() -> Command {
	let mut cmd = Command::cargo_bin("tydoc").expect("tydoc binary should exist");
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Write a minimal project with one category and one documented type.
pub fn write_sample_project(root: &Path) -> AnyEmptyResult {
	std::fs::write(
		root.join("tydoc.toml"),
		"output_directory = \"docs\"\nmodels = [\"types.json\"]\n\n[[categories]]\nname = \
		 \"Demo\"\ntype_filename = \"{TypeId}.md\"\nincluded_namespaces = \
		 [\"Demo\"]\n\n[[categories.sections]]\nname = \"Properties\"\nmembers = [\"property\"]\n",
	)?;

	std::fs::write(
		root.join("types.json"),
		r#"{
	"types": [
		{
			"raw_name": "Widget",
			"namespace": "Demo",
			"members": [
				{
					"name": "Name",
					"kind": "property",
					"member_type": { "raw_name": "String", "namespace": "System" }
				}
			]
		}
	]
}
"#,
	)?;

	Ok(())
}
