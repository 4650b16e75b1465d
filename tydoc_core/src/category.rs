use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog;
use crate::catalog::TypeSource;
use crate::model::GenericInfo;
use crate::model::MemberDescription;
use crate::model::MemberKind;
use crate::model::ParameterDescription;
use crate::model::TypeDescription;
use crate::model::TypeKindSet;
use crate::names;
use crate::names::ARRAY_SUFFIX;
use crate::template::BASES_TAG;
use crate::template::CATEGORY_ID_TAG;
use crate::template::CATEGORY_NAME_TAG;
use crate::template::CATEGORY_NICE_NAME_TAG;
use crate::template::DECORATORS_TAG;
use crate::template::GENERICS_TAG;
use crate::template::MEMBERS_TAG;
use crate::template::NAME_TAG;
use crate::template::NICE_NAME_TAG;
use crate::template::PARAMETERS_TAG;
use crate::template::RenderContext;
use crate::template::SECTION_ID_TAG;
use crate::template::SECTION_NAME_TAG;
use crate::template::SECTION_NICE_NAME_TAG;
use crate::template::SECTIONS_TAG;
use crate::template::TYPE_FILENAME_TAG;
use crate::template::TYPE_ID_TAG;
use crate::template::TYPE_NAME_TAG;
use crate::template::TYPE_NAMESPACE_TAG;
use crate::template::TYPE_NICE_NAME_TAG;
use crate::template::TYPE_RAW_NAME_TAG;
use crate::template::TYPE_TAG;
use crate::template::TYPES_TAG;
use crate::template::TemplateSet;
use crate::template::join_rendered;
use crate::template::strip_arity_markers;

/// A registered external namespace: type references falling under the
/// namespace prefix are rendered with the entry's own link template instead
/// of the category's internal link.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalNamespace {
	pub namespace: String,
	#[serde(default = "default_external_link_template")]
	pub link_template: String,
}

fn default_external_link_template() -> String {
	"[{TypeName}](https://example.com/{TypeNamespace}.{TypeRawName})".into()
}

/// A named slice of a type document, selecting an ordered subset of the
/// type's members.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
	pub name: String,
	/// Member kinds this section covers. Members are emitted in declaration
	/// order.
	#[serde(default = "all_member_kinds")]
	pub members: Vec<MemberKind>,
}

fn all_member_kinds() -> Vec<MemberKind> {
	vec![
		MemberKind::Constructor,
		MemberKind::Field,
		MemberKind::Property,
		MemberKind::Method,
	]
}

impl Section {
	/// Select the members of `ty` this section covers, in declaration order.
	pub fn select<'a>(&self, ty: &'a TypeDescription) -> Vec<&'a MemberDescription> {
		ty.members
			.iter()
			.filter(|member| self.members.contains(&member.kind))
			.collect()
	}

	pub fn id(&self) -> String {
		names::to_id(&self.name)
	}

	pub fn nice_name(&self) -> String {
		names::to_nice_name(&self.name)
	}
}

/// A single file produced by the render pipeline, relative to the output
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
	pub path: PathBuf,
	pub content: String,
}

/// Everything a category renders in one pass: one file per included type
/// followed by the category index file.
#[derive(Debug, Clone)]
pub struct CategoryOutput {
	/// The category name the output belongs to.
	pub category: String,
	/// Rendered files in emission order; the category index is last.
	pub files: Vec<RenderedFile>,
	/// Number of types the category included.
	pub type_count: usize,
}

/// A named grouping of types sharing inclusion rules, templates, and output
/// filename patterns.
///
/// Categories are plain configuration data constructed by deserializing the
/// project config; derived values (`id`, `nice_name`) are computed on
/// demand so a category never carries generation-pass state.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
	pub name: String,
	/// Filename pattern for the category index, itself a template over the
	/// category placeholder set.
	#[serde(default = "default_category_filename")]
	pub category_filename: String,
	/// Filename pattern for each type file, a template over the category and
	/// type placeholder sets.
	#[serde(default = "default_type_filename")]
	pub type_filename: String,
	#[serde(default)]
	pub included_types: TypeKindSet,
	/// Namespace prefixes whose types belong to this category.
	#[serde(default)]
	pub included_namespaces: Vec<String>,
	/// Namespace prefixes filtered out after inclusion.
	#[serde(default)]
	pub excluded_namespaces: Vec<String>,
	/// External namespaces checked, in declaration order, when a type does
	/// not resolve into this category.
	#[serde(default)]
	pub external_namespaces: Vec<ExternalNamespace>,
	/// Sections of each type document, in emission order.
	#[serde(default)]
	pub sections: Vec<Section>,
	#[serde(default)]
	pub templates: TemplateSet,
}

fn default_category_filename() -> String {
	"{CategoryId}.md".into()
}

fn default_type_filename() -> String {
	"{CategoryId}/{TypeId}.md".into()
}

impl Category {
	/// The stable identifier derived from the category name.
	pub fn id(&self) -> String {
		names::to_id(&self.name)
	}

	/// The human-readable display name derived from the category name.
	pub fn nice_name(&self) -> String {
		names::to_nice_name(&self.name)
	}

	/// Whether a type belongs to this category: kind and namespace inclusion
	/// followed by the exclusion list.
	pub fn is_type_included(&self, ty: &TypeDescription) -> bool {
		catalog::is_type_included(ty, &self.included_types, &self.included_namespaces)
			&& !catalog::is_namespace_included(ty, &self.excluded_namespaces)
	}

	/// Enumerate the source and return this category's types sorted by clean
	/// display name. Repeated calls over a fixed source yield identical
	/// ordering.
	pub fn get_types(&self, source: &dyn TypeSource) -> Vec<TypeDescription> {
		let mut types = catalog::find_types(source, |ty| self.is_type_included(ty));
		types.sort_by_key(TypeDescription::clean_name);
		types
	}

	/// Render a reference to another type.
	///
	/// Arrays render as the element link followed by `[]`; open generic
	/// parameters render as their bare name with no link template applied;
	/// everything else resolves through the link precedence rule, with the
	/// generic argument list appended for generic types.
	pub fn get_link(&self, ty: &TypeDescription) -> String {
		if let Some(element) = &ty.element_type {
			return format!("{}{ARRAY_SUFFIX}", self.get_link(element));
		}

		if ty.is_generic_parameter {
			return ty.raw_name.clone();
		}

		let mut link = self.get_type_link(ty);
		if let Some(generics) = &ty.generics {
			link.push_str(&self.render_generic_list(generics));
		}

		link
	}

	/// Resolve the base link for a concrete type. First match wins: the
	/// category's own namespaces (namespace test only, ignoring the kind
	/// filter), then each registered external namespace in declaration
	/// order, then the unknown-link template with no category context.
	fn get_type_link(&self, ty: &TypeDescription) -> String {
		if catalog::is_namespace_included(ty, &self.included_namespaces) {
			return self.render_link(ty, Some(self), &self.templates.internal_link);
		}

		for external in &self.external_namespaces {
			if catalog::is_namespace_included(ty, std::slice::from_ref(&external.namespace)) {
				return self.render_link(ty, None, &external.link_template);
			}
		}

		self.render_link(ty, None, &self.templates.unknown_link)
	}

	fn render_link(
		&self,
		ty: &TypeDescription,
		category: Option<&Category>,
		template: &str,
	) -> String {
		let clean = ty.clean_name();
		let mut ctx = RenderContext::new();

		match category {
			Some(category) => {
				ctx.bind(CATEGORY_NAME_TAG, category.name.as_str())
					.bind(CATEGORY_NICE_NAME_TAG, category.nice_name())
					.bind(CATEGORY_ID_TAG, category.id());
			}
			None => {
				ctx.bind(CATEGORY_NAME_TAG, "")
					.bind(CATEGORY_NICE_NAME_TAG, "")
					.bind(CATEGORY_ID_TAG, "");
			}
		}

		ctx.bind(TYPE_ID_TAG, ty.id())
			.bind(TYPE_NAME_TAG, clean.as_str())
			.bind(TYPE_RAW_NAME_TAG, ty.raw_name.as_str())
			.bind(TYPE_NICE_NAME_TAG, names::to_nice_name(&clean))
			.bind(TYPE_NAMESPACE_TAG, ty.namespace.as_deref().unwrap_or(""));

		strip_arity_markers(&ctx.render(template))
	}

	/// Render a type's generic list, or the empty string for non-generic
	/// types.
	pub fn render_generics(&self, ty: &TypeDescription) -> String {
		ty.generics
			.as_ref()
			.map_or_else(String::new, |generics| self.render_generic_list(generics))
	}

	/// Render a generic argument list wrapped in the configured opener and
	/// closer. Constructed generics link every argument recursively; open
	/// definitions render each parameter through the bare generic template
	/// with only its name bound.
	fn render_generic_list(&self, generics: &GenericInfo) -> String {
		if generics.arguments.is_empty() {
			return String::new();
		}

		let rendered: Vec<String> = generics
			.arguments
			.iter()
			.map(|argument| {
				if generics.constructed {
					self.get_link(argument)
				} else {
					let mut ctx = RenderContext::new();
					ctx.bind(NAME_TAG, argument.raw_name.as_str());
					ctx.render(&self.templates.generic)
				}
			})
			.collect();

		format!(
			"{}{}{}",
			self.templates.generic_opener,
			join_rendered(rendered, &self.templates.generic_separator),
			self.templates.generic_closer
		)
	}

	/// Render a type's base list prefixed with the base opener, or the empty
	/// string when the type has no bases.
	fn render_bases(&self, ty: &TypeDescription) -> String {
		if ty.bases.is_empty() {
			return String::new();
		}

		let rendered: Vec<String> = ty.bases.iter().map(|base| self.get_link(base)).collect();

		format!(
			"{}{}",
			self.templates.base_opener,
			join_rendered(rendered, &self.templates.base_separator)
		)
	}

	fn render_decorators(&self, decorators: &[String]) -> String {
		let rendered: Vec<String> = decorators
			.iter()
			.map(|decorator| {
				let mut ctx = RenderContext::new();
				ctx.bind(NAME_TAG, decorator.as_str());
				ctx.render(&self.templates.decorator)
			})
			.collect();

		join_rendered(rendered, &self.templates.decorator_separator)
	}

	fn render_parameter(&self, parameter: &ParameterDescription) -> String {
		let mut ctx = RenderContext::new();
		ctx.bind(DECORATORS_TAG, self.render_decorators(&parameter.decorators))
			.bind(TYPE_TAG, self.get_link(&parameter.parameter_type))
			.bind(NAME_TAG, parameter.name.as_str());
		ctx.render(&self.templates.parameter)
	}

	/// Render one member through the template matching its kind.
	pub fn render_member(&self, member: &MemberDescription) -> String {
		let template = match member.kind {
			MemberKind::Constructor => &self.templates.constructor,
			MemberKind::Field => &self.templates.field,
			MemberKind::Property => &self.templates.property,
			MemberKind::Method => &self.templates.method,
		};

		let parameters: Vec<String> = member
			.parameters
			.iter()
			.map(|parameter| self.render_parameter(parameter))
			.collect();
		let generics = member
			.generics
			.as_ref()
			.map_or_else(String::new, |generics| self.render_generic_list(generics));
		let member_type = member
			.member_type
			.as_ref()
			.map_or_else(String::new, |ty| self.get_link(ty));

		let mut ctx = RenderContext::new();
		ctx.bind(DECORATORS_TAG, self.render_decorators(&member.decorators))
			.bind(TYPE_TAG, member_type)
			.bind(NAME_TAG, member.name.as_str())
			.bind(NICE_NAME_TAG, member.nice_name())
			.bind(GENERICS_TAG, generics)
			.bind(
				PARAMETERS_TAG,
				join_rendered(parameters, &self.templates.parameter_separator),
			);
		ctx.render(template)
	}

	fn render_section(&self, section: &Section, ty: &TypeDescription) -> String {
		let members: Vec<String> = section
			.select(ty)
			.into_iter()
			.map(|member| self.render_member(member))
			.collect();

		let mut ctx = RenderContext::new();
		ctx.bind(SECTION_NAME_TAG, section.name.as_str())
			.bind(SECTION_NICE_NAME_TAG, section.nice_name())
			.bind(SECTION_ID_TAG, section.id())
			.bind(
				MEMBERS_TAG,
				join_rendered(members, &self.templates.member_separator),
			);
		ctx.render(&self.templates.section)
	}

	fn bind_category_context(&self, ctx: &mut RenderContext) {
		ctx.bind(CATEGORY_NAME_TAG, self.name.as_str())
			.bind(CATEGORY_NICE_NAME_TAG, self.nice_name())
			.bind(CATEGORY_ID_TAG, self.id());
	}

	fn bind_type_identity(&self, ctx: &mut RenderContext, ty: &TypeDescription) {
		let clean = ty.clean_name();
		ctx.bind(TYPE_NAME_TAG, clean.as_str())
			.bind(TYPE_RAW_NAME_TAG, ty.raw_name.as_str())
			.bind(TYPE_NICE_NAME_TAG, names::to_nice_name(&clean))
			.bind(TYPE_ID_TAG, ty.id())
			.bind(TYPE_NAMESPACE_TAG, ty.namespace.as_deref().unwrap_or(""));
	}

	/// Render the output filename for a type from the category's filename
	/// pattern.
	pub fn type_filename(&self, ty: &TypeDescription) -> String {
		let mut ctx = RenderContext::new();
		self.bind_category_context(&mut ctx);
		self.bind_type_identity(&mut ctx, ty);
		ctx.render(&self.type_filename)
	}

	/// Render the output filename for the category index.
	pub fn category_filename(&self) -> String {
		let mut ctx = RenderContext::new();
		self.bind_category_context(&mut ctx);
		ctx.render(&self.category_filename)
	}

	/// Render the index entry for one type.
	pub fn render_type_entry(&self, ty: &TypeDescription) -> String {
		let mut ctx = RenderContext::new();
		self.bind_category_context(&mut ctx);
		self.bind_type_identity(&mut ctx, ty);
		ctx.bind(TYPE_FILENAME_TAG, self.type_filename(ty));
		ctx.render(&self.templates.type_entry)
	}

	/// Render the full document for one type.
	pub fn render_type_file(&self, ty: &TypeDescription) -> String {
		let sections: Vec<String> = self
			.sections
			.iter()
			.map(|section| self.render_section(section, ty))
			.collect();

		let mut ctx = RenderContext::new();
		self.bind_category_context(&mut ctx);
		self.bind_type_identity(&mut ctx, ty);
		ctx.bind(TYPE_FILENAME_TAG, self.type_filename(ty))
			.bind(GENERICS_TAG, self.render_generics(ty))
			.bind(BASES_TAG, self.render_bases(ty))
			.bind(
				SECTIONS_TAG,
				join_rendered(sections, &self.templates.section_separator),
			);
		ctx.render(&self.templates.type_file)
	}

	/// Run the category's render pipeline over the source: one file per
	/// included type (sorted by clean name) followed by the assembled
	/// category index.
	pub fn render(&self, source: &dyn TypeSource) -> CategoryOutput {
		let types = self.get_types(source);
		let mut files = Vec::with_capacity(types.len() + 1);
		let mut entries = Vec::with_capacity(types.len());

		for ty in &types {
			entries.push(self.render_type_entry(ty));
			files.push(RenderedFile {
				path: PathBuf::from(self.type_filename(ty)),
				content: self.render_type_file(ty),
			});
		}

		let mut ctx = RenderContext::new();
		self.bind_category_context(&mut ctx);
		ctx.bind(
			TYPES_TAG,
			join_rendered(entries, &self.templates.type_separator),
		);

		files.push(RenderedFile {
			path: PathBuf::from(self.category_filename()),
			content: ctx.render(&self.templates.category_file),
		});

		CategoryOutput {
			category: self.name.clone(),
			files,
			type_count: types.len(),
		}
	}
}
