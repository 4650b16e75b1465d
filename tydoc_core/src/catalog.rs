use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::TydocError;
use crate::TydocResult;
use crate::model::TypeDescription;
use crate::model::TypeKind;
use crate::model::TypeKindSet;

/// A provider of type descriptions for a generation pass.
///
/// Implementations must skip sub-sources that cannot be introspected rather
/// than failing the whole enumeration; the catalog treats the returned
/// sequence as complete.
pub trait TypeSource {
	fn enumerate_all_types(&self) -> Vec<TypeDescription>;
}

/// An in-memory type source backed by an explicit list of descriptions.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
	pub types: Vec<TypeDescription>,
}

impl StaticSource {
	pub fn new(types: Vec<TypeDescription>) -> Self {
		Self { types }
	}
}

impl TypeSource for StaticSource {
	fn enumerate_all_types(&self) -> Vec<TypeDescription> {
		self.types.clone()
	}
}

/// A type source that loads descriptions from model files on disk.
///
/// Model files list type descriptions under a top-level `types` key and may
/// be JSON, TOML or YAML; the format is chosen by file extension.
#[derive(Debug, Clone)]
pub struct ModelFileSource {
	root: PathBuf,
	paths: Vec<PathBuf>,
}

/// The on-disk shape of a model file.
#[derive(Debug, Deserialize)]
struct ModelFile {
	#[serde(default)]
	types: Vec<TypeDescription>,
}

impl ModelFileSource {
	pub fn new(root: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
		Self {
			root: root.into(),
			paths,
		}
	}

	/// Load every configured model file, failing on the first unreadable or
	/// unparsable file. Use this at startup when a broken model should abort
	/// the run.
	pub fn load(&self) -> TydocResult<Vec<TypeDescription>> {
		let mut types = Vec::new();
		for path in &self.paths {
			types.extend(load_model_file(&self.root.join(path), path)?);
		}
		Ok(types)
	}
}

impl TypeSource for ModelFileSource {
	/// Enumerate types from all model files, skipping files that cannot be
	/// read or parsed.
	fn enumerate_all_types(&self) -> Vec<TypeDescription> {
		let mut types = Vec::new();
		for path in &self.paths {
			match load_model_file(&self.root.join(path), path) {
				Ok(loaded) => types.extend(loaded),
				Err(error) => {
					tracing::warn!(path = %path.display(), %error, "skipping model file");
				}
			}
		}
		types
	}
}

/// Parse a single model file into type descriptions, choosing the parser by
/// file extension.
pub fn load_model_file(path: &Path, display_path: &Path) -> TydocResult<Vec<TypeDescription>> {
	let content = std::fs::read_to_string(path).map_err(|e| TydocError::ModelFile {
		path: display_path.display().to_string(),
		reason: e.to_string(),
	})?;
	let format = path
		.extension()
		.and_then(|extension| extension.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	parse_model_file(&content, &format, &display_path.display().to_string())
}

/// Parse model file content in the given format.
pub fn parse_model_file(
	content: &str,
	format: &str,
	path_display: &str,
) -> TydocResult<Vec<TypeDescription>> {
	let model: ModelFile = match format {
		"json" => serde_json::from_str(content).map_err(|e| TydocError::ModelFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		})?,
		"toml" => toml::from_str(content).map_err(|e| TydocError::ModelFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		})?,
		"yaml" | "yml" => serde_yaml_ng::from_str(content).map_err(|e| TydocError::ModelFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		})?,
		other => return Err(TydocError::UnsupportedModelFormat(other.to_string())),
	};

	Ok(model.types)
}

/// Enumerate every type the source exposes and return those satisfying
/// `predicate`, in enumeration order.
pub fn find_types(
	source: &dyn TypeSource,
	predicate: impl Fn(&TypeDescription) -> bool,
) -> Vec<TypeDescription> {
	source
		.enumerate_all_types()
		.into_iter()
		.filter(|ty| predicate(ty))
		.collect()
}

/// Decide whether a type belongs to the requested kinds and namespaces.
///
/// Conditions are evaluated in order, short-circuiting on the first failing
/// one: visibility, then the abstract/enum/behaviour/asset kind gates, then
/// the plain-class gate for types belonging to no recognized role, then
/// namespace inclusion. Exclusion lists are a caller concern and are applied
/// on top of this predicate (see [`Category::get_types`]).
///
/// [`Category::get_types`]: crate::category::Category::get_types
pub fn is_type_included(
	ty: &TypeDescription,
	included_types: &TypeKindSet,
	included_namespaces: &[String],
) -> bool {
	if !ty.visible
		|| (ty.is_abstract && !included_types.includes(TypeKind::Abstract))
		|| (ty.is_enum && !included_types.includes(TypeKind::Enum))
		|| (ty.is_behaviour && !included_types.includes(TypeKind::Behaviour))
		|| (ty.is_asset && !included_types.includes(TypeKind::Asset))
	{
		return false;
	}

	if !included_types.includes(TypeKind::Class) && !ty.is_behaviour && !ty.is_asset && !ty.is_enum
	{
		return false;
	}

	is_namespace_included(ty, included_namespaces)
}

/// Whether the type's namespace falls under at least one of the given
/// namespace prefixes.
///
/// Matching is segment-aware: prefix `Foo` includes `Foo` and `Foo.Bar` but
/// not `FooBaz`. Types without a namespace are never included.
pub fn is_namespace_included(ty: &TypeDescription, namespaces: &[String]) -> bool {
	let Some(namespace) = ty.namespace.as_deref() else {
		return false;
	};

	namespaces
		.iter()
		.any(|prefix| namespace_matches(namespace, prefix))
}

fn namespace_matches(namespace: &str, prefix: &str) -> bool {
	namespace == prefix
		|| namespace
			.strip_prefix(prefix)
			.is_some_and(|rest| rest.starts_with('.'))
}
