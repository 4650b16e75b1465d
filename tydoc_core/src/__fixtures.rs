use crate::catalog::StaticSource;
use crate::category::Category;
use crate::category::ExternalNamespace;
use crate::category::Section;
use crate::model::GenericInfo;
use crate::model::MemberDescription;
use crate::model::MemberKind;
use crate::model::ParameterDescription;
use crate::model::TypeDescription;
use crate::model::TypeKind;
use crate::model::TypeKindSet;
use crate::template::TemplateSet;

pub fn string_type() -> TypeDescription {
	TypeDescription {
		namespace: Some("System".into()),
		..TypeDescription::new("String")
	}
}

pub fn int_type() -> TypeDescription {
	TypeDescription {
		namespace: Some("System".into()),
		..TypeDescription::new("Int32")
	}
}

pub fn bool_type() -> TypeDescription {
	TypeDescription {
		namespace: Some("System".into()),
		..TypeDescription::new("Boolean")
	}
}

/// A constructed `List<T>` with the given argument.
pub fn list_of(argument: TypeDescription) -> TypeDescription {
	TypeDescription {
		namespace: Some("System.Collections.Generic".into()),
		generics: Some(GenericInfo {
			constructed: true,
			arguments: vec![argument],
		}),
		..TypeDescription::new("List`1")
	}
}

/// The open definition `List<T>` whose argument is a generic parameter.
pub fn open_list() -> TypeDescription {
	TypeDescription {
		namespace: Some("System.Collections.Generic".into()),
		generics: Some(GenericInfo {
			constructed: false,
			arguments: vec![TypeDescription {
				is_generic_parameter: true,
				..TypeDescription::new("T")
			}],
		}),
		..TypeDescription::new("List`1")
	}
}

pub fn array_of(element: TypeDescription) -> TypeDescription {
	TypeDescription {
		element_type: Some(Box::new(element.clone())),
		..TypeDescription::new(format!("{}[]", element.raw_name))
	}
}

/// A documented behaviour with a property, a field and a method.
pub fn widget_type() -> TypeDescription {
	TypeDescription {
		namespace: Some("Demo".into()),
		is_behaviour: true,
		bases: vec![TypeDescription {
			namespace: Some("Demo".into()),
			is_abstract: true,
			..TypeDescription::new("Gadget")
		}],
		members: vec![
			MemberDescription {
				member_type: Some(string_type()),
				..MemberDescription::new("Name", MemberKind::Property)
			},
			MemberDescription {
				member_type: Some(int_type()),
				decorators: vec!["static".into()],
				..MemberDescription::new("Count", MemberKind::Field)
			},
			MemberDescription {
				member_type: Some(bool_type()),
				parameters: vec![ParameterDescription::new("other", widget_reference())],
				..MemberDescription::new("Matches", MemberKind::Method)
			},
		],
		..TypeDescription::new("Widget")
	}
}

/// A bare reference to `Demo.Widget` with no members, as it would appear in
/// another type's signature.
pub fn widget_reference() -> TypeDescription {
	TypeDescription {
		namespace: Some("Demo".into()),
		is_behaviour: true,
		..TypeDescription::new("Widget")
	}
}

pub fn gadget_type() -> TypeDescription {
	TypeDescription {
		namespace: Some("Demo".into()),
		is_abstract: true,
		..TypeDescription::new("Gadget")
	}
}

/// A category over the `Demo` namespace with a single `Properties` section
/// and the default templates.
pub fn demo_category() -> Category {
	Category {
		name: "Demo".into(),
		category_filename: "{CategoryId}.md".into(),
		type_filename: "{TypeId}.md".into(),
		included_types: TypeKindSet::default(),
		included_namespaces: vec!["Demo".into()],
		excluded_namespaces: Vec::new(),
		external_namespaces: vec![ExternalNamespace {
			namespace: "System".into(),
			link_template: "[{TypeName}](https://docs.example.com/{TypeRawName})".into(),
		}],
		sections: vec![Section {
			name: "Properties".into(),
			members: vec![MemberKind::Property],
		}],
		templates: TemplateSet::default(),
	}
}

/// A category restricted to behaviours, with no external namespaces.
pub fn behaviours_category() -> Category {
	Category {
		included_types: TypeKindSet::new([TypeKind::Behaviour]),
		external_namespaces: Vec::new(),
		..demo_category()
	}
}

pub fn demo_source() -> StaticSource {
	StaticSource::new(vec![widget_type(), gadget_type(), string_type()])
}
