use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate markdown reference docs for your types from declarative templates.",
	long_about = "tydoc (type documentation) renders reference pages for the types described in \
	              your model files, driven entirely by configurable template strings.\n\nCategories \
	              group related types, resolve cross-type links, and emit one file per type plus an \
	              index.\n\nQuick start:\n  tydoc init      Create a starter config\n  tydoc \
	              generate  Render all categories to disk\n  tydoc check     Verify generated docs \
	              are up to date\n  tydoc list      Show configured categories and their types"
)]
pub struct TydocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize tydoc in a project by creating starter files.
	///
	/// Creates a `tydoc.toml` with a commented example category and a
	/// sample `types.json` model in the project root. Files that already
	/// exist are left untouched.
	Init,
	/// Render every category and write the output files.
	///
	/// Loads type descriptions from the configured model files, renders each
	/// category's types through its templates, and writes one file per type
	/// plus a category index under the output directory.
	///
	/// Use `--dry-run` to preview which files would be written, or `--watch`
	/// to re-generate whenever model files or the config change.
	Generate {
		/// Preview the files that would be written without touching disk.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Only generate the named category.
		#[arg(long)]
		category: Option<String>,

		/// Watch for file changes and re-generate automatically. Monitors
		/// the config file and model files for modifications.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// Check that the generated docs match what a fresh run would produce.
	///
	/// Renders every category in memory and compares the result against the
	/// files in the output directory. Exits with a non-zero status code if
	/// any file is stale or missing.
	///
	/// Ideal for CI pipelines. Use `--diff` to see exactly what changed and
	/// `--format` to control the output style.
	Check {
		/// Show a unified diff for each stale file, highlighting the
		/// differences between current and expected content.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output, `json` for programmatic consumption, or `github` for
		/// GitHub Actions annotations that appear inline on PRs.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,

		/// Watch for file changes and re-run checks automatically. Monitors
		/// the config file and model files for modifications.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// List the configured categories and the types each one includes.
	///
	/// Displays every category from `tydoc.toml` with its included types and
	/// output filenames. Useful for auditing documentation coverage before
	/// generating.
	List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Each stale entry includes
	/// the file path plus the current and expected content lengths.
	Json,
	/// GitHub Actions annotation format. Emits `::warning` or `::error`
	/// annotations that appear inline on pull request diffs.
	Github,
}
