use serde::Deserialize;
use serde::Serialize;

use crate::names::GENERIC_ARITY_MARKER;

// Placeholder tags recognized by the renderer. Templates reference them
// verbatim, e.g. `"# {TypeNiceName}"`.

pub const CATEGORY_NAME_TAG: &str = "{CategoryName}";
pub const CATEGORY_NICE_NAME_TAG: &str = "{CategoryNiceName}";
pub const CATEGORY_ID_TAG: &str = "{CategoryId}";

pub const TYPE_NAME_TAG: &str = "{TypeName}";
pub const TYPE_RAW_NAME_TAG: &str = "{TypeRawName}";
pub const TYPE_NICE_NAME_TAG: &str = "{TypeNiceName}";
pub const TYPE_ID_TAG: &str = "{TypeId}";
pub const TYPE_NAMESPACE_TAG: &str = "{TypeNamespace}";
pub const TYPE_FILENAME_TAG: &str = "{TypeFilename}";
pub const TYPES_TAG: &str = "{Types}";
pub const GENERICS_TAG: &str = "{Generics}";
pub const BASES_TAG: &str = "{Bases}";
pub const SECTIONS_TAG: &str = "{Sections}";

pub const SECTION_NAME_TAG: &str = "{SectionName}";
pub const SECTION_NICE_NAME_TAG: &str = "{SectionNiceName}";
pub const SECTION_ID_TAG: &str = "{SectionId}";
pub const MEMBERS_TAG: &str = "{Members}";

pub const NAME_TAG: &str = "{Name}";
pub const NICE_NAME_TAG: &str = "{NiceName}";
pub const TYPE_TAG: &str = "{Type}";
pub const DECORATORS_TAG: &str = "{Decorators}";
pub const PARAMETERS_TAG: &str = "{Parameters}";

/// Ephemeral placeholder bindings for a single render call.
///
/// Rendering substitutes every bound placeholder with its already-rendered
/// value; placeholders with no binding are left verbatim in the output so a
/// typo in a configured template shows up in the generated text instead of
/// failing the run. Bindings are applied in insertion order, which makes
/// rendering deterministic.
#[derive(Debug, Default)]
pub struct RenderContext {
	bindings: Vec<(&'static str, String)>,
}

impl RenderContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind a placeholder tag to an already-rendered value. Later bindings
	/// for the same tag have no effect since the first substitution removes
	/// the placeholder.
	pub fn bind(&mut self, tag: &'static str, value: impl Into<String>) -> &mut Self {
		self.bindings.push((tag, value.into()));
		self
	}

	/// Substitute every bound placeholder in `template`.
	pub fn render(&self, template: &str) -> String {
		let mut output = template.to_string();
		for (tag, value) in &self.bindings {
			if output.contains(tag) {
				output = output.replace(tag, value);
			}
		}
		output
	}
}

/// Join independently rendered elements with a separator. An empty sequence
/// yields the empty string with no separator emitted.
pub fn join_rendered(items: Vec<String>, separator: &str) -> String {
	items.join(separator)
}

/// Replace any generic-arity marker left in rendered link text with a dash.
/// Some external documentation systems encode generic arity in URLs with the
/// same marker character the source identifiers use.
pub fn strip_arity_markers(rendered: &str) -> String {
	rendered.replace(GENERIC_ARITY_MARKER, "-")
}

/// The named collection of template strings used at each rendering context,
/// plus the separators used when joining repeated renderings.
///
/// Every field has a default so configuration only needs to override the
/// templates it cares about. The defaults emit markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSet {
	/// The category index document. Binds the category context plus
	/// `{Types}`, the joined type entries.
	pub category_file: String,
	/// One entry per type in the category index.
	pub type_entry: String,
	pub type_separator: String,

	/// The per-type document. Binds the category and type contexts,
	/// including `{Generics}`, `{Bases}` and `{Sections}`.
	pub type_file: String,

	/// A single generic parameter on an open generic definition. Binds
	/// `{Name}` only; open parameters have no concrete type to link to.
	pub generic: String,
	pub generic_opener: String,
	pub generic_closer: String,
	pub generic_separator: String,

	/// Prefix emitted before the joined base list when a type has bases.
	pub base_opener: String,
	pub base_separator: String,

	/// One section of a type document. Binds the section context plus
	/// `{Members}`, the joined member renderings.
	pub section: String,
	pub section_separator: String,

	pub constructor: String,
	pub field: String,
	pub property: String,
	pub method: String,
	pub member_separator: String,

	pub parameter: String,
	pub parameter_separator: String,

	pub decorator: String,
	pub decorator_separator: String,

	/// Link template for a type inside this category's namespaces.
	pub internal_link: String,
	/// Link template for a type resolving to neither the category nor any
	/// registered external namespace.
	pub unknown_link: String,
}

impl Default for TemplateSet {
	fn default() -> Self {
		Self {
			category_file: "# {CategoryNiceName}\n\n{Types}\n".into(),
			type_entry: "- [{TypeNiceName}]({TypeFilename})".into(),
			type_separator: "\n".into(),

			type_file: "# {TypeNiceName} {#{TypeId}}\n\n`{TypeNamespace}.\
			            {TypeName}{Generics}`{Bases}\n\n{Sections}"
				.into(),

			generic: "{Name}".into(),
			generic_opener: "<".into(),
			generic_closer: ">".into(),
			generic_separator: ", ".into(),

			base_opener: " : ".into(),
			base_separator: ", ".into(),

			section: "## {SectionNiceName}\n\n{Members}\n".into(),
			section_separator: "\n".into(),

			constructor: "{Name}({Parameters})".into(),
			field: "{Decorators}{Type} {Name}".into(),
			property: "{Decorators}{Type} {Name}".into(),
			method: "{Decorators}{Type} {Name}{Generics}({Parameters})".into(),
			member_separator: "\n\n".into(),

			parameter: "{Decorators}{Type} {Name}".into(),
			parameter_separator: ", ".into(),

			decorator: "{Name} ".into(),
			decorator_separator: String::new(),

			internal_link: "[{TypeName}]({TypeId}.md)".into(),
			unknown_link: "{TypeName}".into(),
		}
	}
}
