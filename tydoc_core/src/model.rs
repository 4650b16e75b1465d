use serde::Deserialize;
use serde::Serialize;

use crate::names;

/// Read-only description of one introspected type.
///
/// Descriptions are produced once per generation pass by a type source
/// collaborator (commonly a model file, see
/// [`ModelFileSource`](crate::catalog::ModelFileSource)) and are never
/// mutated by the engine. Identity is structural: two descriptions of the
/// same symbol compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescription {
	/// The raw symbol name, including any generic-arity suffix (`List`1`).
	pub raw_name: String,
	/// The namespace the type is declared in, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
	/// The enclosing type for nested declarations.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub declaring_type: Option<Box<TypeDescription>>,
	/// Whether the type is exported/public and visible to the catalog.
	#[serde(default = "default_true")]
	pub visible: bool,
	#[serde(default)]
	pub is_abstract: bool,
	#[serde(default)]
	pub is_enum: bool,
	/// Whether the type belongs to the behaviour-like base role used for
	/// inclusion filtering.
	#[serde(default)]
	pub is_behaviour: bool,
	/// Whether the type belongs to the asset-like base role used for
	/// inclusion filtering.
	#[serde(default)]
	pub is_asset: bool,
	/// The element type when this description is an array.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub element_type: Option<Box<TypeDescription>>,
	/// Whether this is an open generic parameter (`T`) rather than a
	/// concrete type.
	#[serde(default)]
	pub is_generic_parameter: bool,
	/// Generic argument or parameter list when the type is generic.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub generics: Option<GenericInfo>,
	/// Base types, in declaration order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub bases: Vec<TypeDescription>,
	/// Members, in declaration order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub members: Vec<MemberDescription>,
}

impl TypeDescription {
	/// Create a minimal, visible, non-generic type description.
	pub fn new(raw_name: impl Into<String>) -> Self {
		Self {
			raw_name: raw_name.into(),
			namespace: None,
			declaring_type: None,
			visible: true,
			is_abstract: false,
			is_enum: false,
			is_behaviour: false,
			is_asset: false,
			element_type: None,
			is_generic_parameter: false,
			generics: None,
			bases: Vec::new(),
			members: Vec::new(),
		}
	}

	/// Whether this description is an array type.
	pub fn is_array(&self) -> bool {
		self.element_type.is_some()
	}

	/// The display name with arity/reference markers stripped and built-in
	/// aliases applied.
	pub fn clean_name(&self) -> String {
		names::clean_name(&self.raw_name)
	}

	/// The human-readable, space-separated display name.
	pub fn nice_name(&self) -> String {
		names::to_nice_name(&self.clean_name())
	}

	/// The stable identifier, composed with the identifiers of any enclosing
	/// types.
	pub fn id(&self) -> String {
		names::type_id(self)
	}
}

/// The generic argument list of a generic type or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericInfo {
	/// `true` for a constructed generic (`List<Widget>`) whose arguments are
	/// concrete types; `false` for an open definition (`List<T>`) whose
	/// arguments are generic parameters.
	#[serde(default)]
	pub constructed: bool,
	/// The ordered argument (or parameter) descriptions.
	#[serde(default)]
	pub arguments: Vec<TypeDescription>,
}

/// A documented member of a type: constructor, field, property or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDescription {
	pub name: String,
	pub kind: MemberKind,
	/// The member's type reference: field/property type or method return
	/// type. Constructors have none.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub member_type: Option<TypeDescription>,
	/// Ordered decorator names (modifiers such as `static` or `readonly`).
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub decorators: Vec<String>,
	/// Ordered parameters for constructors and methods.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub parameters: Vec<ParameterDescription>,
	/// Generic parameter list for generic methods.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub generics: Option<GenericInfo>,
}

impl MemberDescription {
	pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
		Self {
			name: name.into(),
			kind,
			member_type: None,
			decorators: Vec::new(),
			parameters: Vec::new(),
			generics: None,
		}
	}

	/// The human-readable, space-separated member name.
	pub fn nice_name(&self) -> String {
		names::to_nice_name(&self.name)
	}
}

/// The kind of a documented member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
	Constructor,
	Field,
	Property,
	Method,
}

/// A single parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescription {
	pub name: String,
	pub parameter_type: TypeDescription,
	/// Ordered decorator names (e.g. `ref`, `out`).
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub decorators: Vec<String>,
}

impl ParameterDescription {
	pub fn new(name: impl Into<String>, parameter_type: TypeDescription) -> Self {
		Self {
			name: name.into(),
			parameter_type,
			decorators: Vec::new(),
		}
	}
}

/// The kinds of types a category can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
	/// Behaviour-like role (component types).
	Behaviour,
	/// Asset-like role (resource types).
	Asset,
	/// Plain classes belonging to none of the recognized roles.
	Class,
	Enum,
	Abstract,
}

/// The set of type kinds a category includes. Defaults to every kind.
#[derive(
	Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::Deref, derive_more::DerefMut,
)]
pub struct TypeKindSet(Vec<TypeKind>);

impl TypeKindSet {
	pub fn new(kinds: impl IntoIterator<Item = TypeKind>) -> Self {
		Self(kinds.into_iter().collect())
	}

	/// The set containing every type kind.
	pub fn all() -> Self {
		Self(vec![
			TypeKind::Behaviour,
			TypeKind::Asset,
			TypeKind::Class,
			TypeKind::Enum,
			TypeKind::Abstract,
		])
	}

	pub fn includes(&self, kind: TypeKind) -> bool {
		self.0.contains(&kind)
	}
}

impl Default for TypeKindSet {
	fn default() -> Self {
		Self::all()
	}
}

fn default_true() -> bool {
	true
}
