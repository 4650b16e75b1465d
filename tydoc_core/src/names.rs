use crate::model::TypeDescription;

/// The character embedded in a raw type name that encodes how many generic
/// parameters the type takes (e.g. `List`1`).
pub const GENERIC_ARITY_MARKER: char = '`';

/// Suffix appended to a type reference when rendering an array link.
pub const ARRAY_SUFFIX: &str = "[]";

/// Raw names of built-in types that are displayed under a conventional short
/// alias instead of their full runtime name.
const BUILTIN_ALIASES: [(&str, &str); 5] = [
	("Void", "void"),
	("Boolean", "bool"),
	("Int32", "int"),
	("Single", "float"),
	("String", "string"),
];

/// Derive a stable, dash-delimited, all-lowercase identifier from a raw
/// symbol name.
///
/// The first character is lowercased as-is. Every subsequent uppercase
/// character is preceded by a dash, array brackets are dropped, and the
/// generic-arity marker becomes a dash with its arity digits removed:
///
/// ```
/// use tydoc_core::names::to_id;
///
/// assert_eq!(to_id("HelloWorld"), "hello-world");
/// assert_eq!(to_id("IList`1"), "i-list-");
/// assert_eq!(to_id("Int32[]"), "int32");
/// ```
pub fn to_id(name: &str) -> String {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return String::new();
	};

	let mut id = String::with_capacity(name.len() + 4);
	id.extend(first.to_lowercase());

	let mut in_arity = false;
	for current in chars {
		if current == '[' || current == ']' {
			continue;
		}

		if in_arity && current.is_ascii_digit() {
			continue;
		}
		in_arity = false;

		if current == GENERIC_ARITY_MARKER {
			id.push('-');
			in_arity = true;
		} else if current.is_uppercase() {
			id.push('-');
			id.extend(current.to_lowercase());
		} else {
			id.extend(current.to_lowercase());
		}
	}

	id
}

/// Derive a human-readable, space-separated display name from a camel or
/// Pascal-case identifier.
///
/// A space is inserted before every uppercase character after the first,
/// unless the previous emitted character was itself a space or an opening
/// generic bracket. Runs of uppercase characters are not collapsed:
/// `"ABTest"` becomes `"A B Test"`.
pub fn to_nice_name(name: &str) -> String {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return String::new();
	};

	let mut nice = String::with_capacity(name.len() + 4);
	nice.push(first);

	let mut boundary = first != ' ' && first != '<';
	for current in chars {
		if boundary && current.is_uppercase() {
			nice.push(' ');
		}

		nice.push(current);
		boundary = current != ' ' && current != '<';
	}

	nice
}

/// Strip the generic-arity suffix and trailing reference markers from a raw
/// type name, then map built-in runtime names to their conventional alias
/// (`Int32` → `int`, `Boolean` → `bool`, ...). Unmapped names pass through
/// unchanged.
pub fn clean_name(raw_name: &str) -> String {
	let name = match raw_name.find(GENERIC_ARITY_MARKER) {
		Some(index) => &raw_name[..index],
		None => raw_name,
	};
	let name = name.trim_end_matches('&');

	BUILTIN_ALIASES
		.iter()
		.find(|(from, _)| *from == name)
		.map_or_else(|| name.to_string(), |(_, alias)| (*alias).to_string())
}

/// Derive the identifier for a type, composing the identifiers of its
/// enclosing types: a nested `Outer.Inner` yields `outer-inner`.
pub fn type_id(ty: &TypeDescription) -> String {
	match &ty.declaring_type {
		Some(outer) => format!("{}-{}", type_id(outer), to_id(&ty.raw_name)),
		None => to_id(&ty.raw_name),
	}
}
