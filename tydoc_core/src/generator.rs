use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::TydocError;
use crate::TydocResult;
use crate::catalog::ModelFileSource;
use crate::catalog::TypeSource;
use crate::category::Category;
use crate::category::CategoryOutput;

/// Filenames probed, in order, when discovering the project config.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["tydoc.toml", ".tydoc.toml", ".config/tydoc.toml"];

/// The project configuration: where output goes, which model files describe
/// the types, and the categories to generate.
#[derive(Debug, Deserialize)]
pub struct GeneratorConfig {
	/// Directory all rendered files are written under, relative to the
	/// project root.
	#[serde(default = "default_output_directory")]
	pub output_directory: PathBuf,
	/// Model files to load type descriptions from, relative to the project
	/// root.
	#[serde(default)]
	pub models: Vec<PathBuf>,
	#[serde(default)]
	pub categories: Vec<Category>,
}

fn default_output_directory() -> PathBuf {
	PathBuf::from("docs/generated")
}

impl GeneratorConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> TydocResult<Option<GeneratorConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: GeneratorConfig =
			toml::from_str(&content).map_err(|e| TydocError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Load the config at `root`, failing when no config file exists.
	pub fn load_required(root: &Path) -> TydocResult<GeneratorConfig> {
		Self::load(root)?.ok_or(TydocError::MissingConfig)
	}

	/// The type source backed by this config's model files.
	#[must_use]
	pub fn source(&self, root: &Path) -> ModelFileSource {
		ModelFileSource::new(root, self.models.clone())
	}

	/// Find a category by name.
	pub fn category(&self, name: &str) -> TydocResult<&Category> {
		self.categories
			.iter()
			.find(|category| category.name == name)
			.ok_or_else(|| TydocError::UnknownCategory(name.to_string()))
	}
}

/// Where a generation pass currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPhase {
	Starting,
	/// Rendering the named category.
	Category(String),
	Done,
}

/// A progress report emitted while a generation pass runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
	pub phase: GenerationPhase,
	/// Completed fraction of the pass, in `0.0..=1.0`.
	pub fraction: f32,
	pub message: String,
}

/// Render every category against the source, reporting progress before each
/// category and once at the start and end of the pass.
///
/// Rendering is pure: nothing touches the filesystem until the outputs are
/// handed to [`write_outputs`] or [`check_outputs`].
pub fn render_run(
	categories: &[Category],
	source: &dyn TypeSource,
	mut on_progress: impl FnMut(Progress),
) -> Vec<CategoryOutput> {
	let steps = (categories.len() + 1) as f32;

	on_progress(Progress {
		phase: GenerationPhase::Starting,
		fraction: 0.0,
		message: "loading types".into(),
	});

	let mut outputs = Vec::with_capacity(categories.len());
	for (index, category) in categories.iter().enumerate() {
		let fraction = (index + 1) as f32 / steps;
		on_progress(Progress {
			phase: GenerationPhase::Category(category.name.clone()),
			fraction,
			message: format!("generating {}", category.name),
		});

		outputs.push(category.render(source));
	}

	on_progress(Progress {
		phase: GenerationPhase::Done,
		fraction: 1.0,
		message: "done".into(),
	});

	outputs
}

/// A destination for rendered files.
///
/// `write` reports success per file; implementations log failures and return
/// `false` instead of aborting the pass, so one unwritable file never loses
/// the remaining output.
pub trait FileSink {
	fn write(&self, folder: &Path, filename: &Path, content: &str) -> bool;
}

/// A sink that writes files under a directory, creating parent directories
/// as needed.
#[derive(Debug, Default)]
pub struct DirectorySink;

impl FileSink for DirectorySink {
	fn write(&self, folder: &Path, filename: &Path, content: &str) -> bool {
		let path = folder.join(filename);

		if let Some(parent) = path.parent() {
			if let Err(error) = std::fs::create_dir_all(parent) {
				tracing::warn!(path = %path.display(), %error, "failed to create output directory");
				return false;
			}
		}

		match std::fs::write(&path, content) {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(path = %path.display(), %error, "failed to write output file");
				false
			}
		}
	}
}

/// The outcome of writing a set of category outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
	/// Paths written successfully, relative to the output directory.
	pub written: Vec<PathBuf>,
	/// Paths whose on-disk content already matched and were left untouched.
	pub unchanged: Vec<PathBuf>,
	/// Paths that could not be written.
	pub failed: Vec<PathBuf>,
}

impl WriteReport {
	#[must_use]
	pub fn is_ok(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Write every rendered file through the sink. Files whose on-disk content
/// already matches are left untouched, so repeated runs converge instead of
/// re-triggering file watchers on their own output. Individual write
/// failures are recorded in the report rather than aborting the pass.
pub fn write_outputs(
	outputs: &[CategoryOutput],
	sink: &dyn FileSink,
	output_directory: &Path,
) -> WriteReport {
	let mut report = WriteReport::default();

	for output in outputs {
		for file in &output.files {
			let on_disk = std::fs::read_to_string(output_directory.join(&file.path));
			if on_disk.is_ok_and(|current| current == file.content) {
				report.unchanged.push(file.path.clone());
				continue;
			}

			if sink.write(output_directory, &file.path, &file.content) {
				report.written.push(file.path.clone());
			} else {
				report.failed.push(file.path.clone());
			}
		}
	}

	report
}

/// A file on disk whose content no longer matches what a generation pass
/// would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
	/// Path relative to the output directory.
	pub path: PathBuf,
	/// What is currently on disk.
	pub current: String,
	/// What a generation pass would write.
	pub expected: String,
}

/// The outcome of comparing rendered outputs against what is on disk.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
	pub stale: Vec<StaleFile>,
	/// Expected files missing from the output directory.
	pub missing: Vec<PathBuf>,
}

impl CheckResult {
	#[must_use]
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty() && self.missing.is_empty()
	}
}

/// Compare every rendered file against the output directory without writing
/// anything.
pub fn check_outputs(outputs: &[CategoryOutput], output_directory: &Path) -> CheckResult {
	let mut result = CheckResult::default();

	for output in outputs {
		for file in &output.files {
			let path = output_directory.join(&file.path);
			match std::fs::read_to_string(&path) {
				Ok(current) if current == file.content => {}
				Ok(current) => {
					result.stale.push(StaleFile {
						path: file.path.clone(),
						current,
						expected: file.content.clone(),
					});
				}
				Err(_) => {
					result.missing.push(file.path.clone());
				}
			}
		}
	}

	result
}
