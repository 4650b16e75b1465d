use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TydocError {
	#[error(transparent)]
	#[diagnostic(code(tydoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tydoc::config_parse),
		help("check that tydoc.toml is valid TOML with at least one [[categories]] entry")
	)]
	ConfigParse(String),

	#[error("no config file found")]
	#[diagnostic(
		code(tydoc::missing_config),
		help("run `tydoc init` to create a starter tydoc.toml")
	)]
	MissingConfig,

	#[error("failed to load model file `{path}`: {reason}")]
	#[diagnostic(
		code(tydoc::model_file),
		help("model files list type descriptions under a top-level `types` key")
	)]
	ModelFile { path: String, reason: String },

	#[error("unsupported model file format: `{0}`")]
	#[diagnostic(
		code(tydoc::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedModelFormat(String),

	#[error("no category named `{0}` is configured")]
	#[diagnostic(
		code(tydoc::unknown_category),
		help("run `tydoc list` to see the configured categories")
	)]
	UnknownCategory(String),
}

pub type TydocResult<T> = Result<T, TydocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
