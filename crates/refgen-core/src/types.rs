//! Declaration model shared by the builder, assembler and emitters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::doc_comment::DocComment;

/// One documented service discovered on the root listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Namespace name (page title without the trailing "Service").
    pub name: String,
    /// First descriptive paragraph of the service page.
    pub description: String,
    /// Path of the service page relative to the documentation host.
    pub source_path: String,
}

/// Target type reference produced by type normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
    /// Built-in type of the target vocabulary (`number`, `string`, ...).
    Primitive(String),
    /// Reference to a documented or synthesized type by name.
    Named(String),
    /// Array of the inner type.
    Array(Box<TypeRef>),
    /// Reference to the values of a documented enumeration.
    EnumValueOf(String),
    /// Dictionary keyed by strings.
    StringKeyedMap(Box<TypeRef>),
}

impl TypeRef {
    /// Shorthand for [`TypeRef::Primitive`].
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Shorthand for [`TypeRef::Named`].
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wrap a type in [`TypeRef::Array`].
    #[must_use]
    pub fn array_of(inner: Self) -> Self {
        Self::Array(Box::new(inner))
    }

    /// The `void` type used for methods without a documented return.
    #[must_use]
    pub fn void() -> Self {
        Self::primitive("void")
    }

    /// `{ [key: string]: unknown }`, used for untyped object parameters.
    #[must_use]
    pub fn unknown_map() -> Self {
        Self::StringKeyedMap(Box::new(Self::primitive("unknown")))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) | Self::Named(name) => f.write_str(name),
            Self::Array(inner) => match inner.as_ref() {
                Self::EnumValueOf(_) => write!(f, "({inner})[]"),
                _ => write!(f, "{inner}[]"),
            },
            Self::EnumValueOf(name) => write!(f, "typeof {name}"),
            Self::StringKeyedMap(value) => write!(f, "{{ [key: string]: {value} }}"),
        }
    }
}

/// Literal initializer of an enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// Numeric initializer.
    Num(f64),
    /// String initializer.
    Str(String),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// A single member of an enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member identifier.
    pub name: String,
    /// Documented description.
    pub description: String,
    /// Optional initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EnumValue>,
}

/// A property of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// Property identifier.
    pub name: String,
    /// Normalized property type.
    pub type_ref: TypeRef,
    /// Documented description.
    pub description: String,
    /// Whether the property may be omitted.
    #[serde(default)]
    pub optional: bool,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    /// Parameter identifier.
    pub name: String,
    /// Normalized parameter type.
    pub type_ref: TypeRef,
    /// Whether the argument may be omitted.
    #[serde(default)]
    pub optional: bool,
    /// Literal default value, if documented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether this is a rest parameter.
    #[serde(default)]
    pub rest: bool,
}

impl ParameterDeclaration {
    /// A required, non-rest parameter without default.
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            optional: false,
            default: None,
            rest: false,
        }
    }
}

/// A method of an interface together with its synthesized documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    /// Method identifier.
    pub name: String,
    /// Parameters in declared order.
    pub parameters: Vec<ParameterDeclaration>,
    /// Normalized return type.
    pub return_type: TypeRef,
    /// Summary paragraph.
    pub description: String,
    /// Code example shown on the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Prose describing the return value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_description: Option<String>,
    /// Structured leading documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
}

/// Classification of a documented member, decided once from its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationClass {
    /// An enumeration of constant values.
    Enum,
    /// A structured type with properties and methods.
    Interface,
}

/// Payload of a declaration, one branch per classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationKind {
    /// Enum members in document order.
    Enum {
        /// Members of the enumeration.
        members: Vec<EnumMember>,
    },
    /// Interface body: properties first, then methods.
    Interface {
        /// Properties in table order.
        properties: Vec<PropertyDeclaration>,
        /// Methods in detail-block order.
        methods: Vec<MethodDeclaration>,
    },
}

/// A documented enum or interface (or a synthesized options interface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration identifier.
    pub name: String,
    /// Documented description, emitted as a leading comment.
    pub description: String,
    /// Classification and payload.
    #[serde(flatten)]
    pub kind: DeclarationKind,
}

impl Declaration {
    /// Create an empty declaration of the given class.
    pub fn skeleton(
        name: impl Into<String>,
        description: impl Into<String>,
        class: DeclarationClass,
    ) -> Self {
        let kind = match class {
            DeclarationClass::Enum => DeclarationKind::Enum {
                members: Vec::new(),
            },
            DeclarationClass::Interface => DeclarationKind::Interface {
                properties: Vec::new(),
                methods: Vec::new(),
            },
        };
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    /// Create an interface from a list of properties.
    pub fn interface(
        name: impl Into<String>,
        description: impl Into<String>,
        properties: Vec<PropertyDeclaration>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: DeclarationKind::Interface {
                properties,
                methods: Vec::new(),
            },
        }
    }

    /// The classification of this declaration.
    pub const fn class(&self) -> DeclarationClass {
        match self.kind {
            DeclarationKind::Enum { .. } => DeclarationClass::Enum,
            DeclarationKind::Interface { .. } => DeclarationClass::Interface,
        }
    }

    /// Whether the declaration has no populated fields.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            DeclarationKind::Enum { members } => members.is_empty(),
            DeclarationKind::Interface {
                properties,
                methods,
            } => properties.is_empty() && methods.is_empty(),
        }
    }
}

/// Entry of a namespace body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum NamespaceMember {
    /// An enum or interface.
    Declaration(Declaration),
    /// A nested namespace.
    Namespace(NamespaceNode),
}

/// A namespace wrapping declarations or other namespaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceNode {
    /// Namespace identifier.
    pub name: String,
    /// Leading comment text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body in insertion order.
    pub members: Vec<NamespaceMember>,
    /// Whether the namespace is declared ambient (`declare namespace`).
    #[serde(default)]
    pub ambient: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display() {
        assert_eq!(TypeRef::primitive("number").to_string(), "number");
        assert_eq!(
            TypeRef::array_of(TypeRef::named("Range")).to_string(),
            "Range[]"
        );
        assert_eq!(
            TypeRef::EnumValueOf("Color".into()).to_string(),
            "typeof Color"
        );
        assert_eq!(
            TypeRef::array_of(TypeRef::EnumValueOf("Color".into())).to_string(),
            "(typeof Color)[]"
        );
        assert_eq!(
            TypeRef::unknown_map().to_string(),
            "{ [key: string]: unknown }"
        );
    }

    #[test]
    fn test_skeleton_classification_is_kept() {
        let decl = Declaration::skeleton("Color", "An enum of colors", DeclarationClass::Enum);
        assert_eq!(decl.class(), DeclarationClass::Enum);
        assert!(decl.is_empty());

        let decl = Declaration::skeleton("Range", "A range", DeclarationClass::Interface);
        assert_eq!(decl.class(), DeclarationClass::Interface);
        assert!(decl.is_empty());
    }

    #[test]
    fn test_enum_value_display() {
        assert_eq!(EnumValue::Num(3.0).to_string(), "3");
        assert_eq!(EnumValue::Str("RED".into()).to_string(), "\"RED\"");
    }

    #[test]
    fn test_declaration_json_shape() -> Result<(), serde_json::Error> {
        let decl = Declaration::interface(
            "SetOptionsOptions",
            "",
            vec![PropertyDeclaration {
                name: "Retries".into(),
                type_ref: TypeRef::primitive("number"),
                description: "number of retries".into(),
                optional: false,
            }],
        );

        let json = serde_json::to_value(&decl)?;
        assert_eq!(json["kind"], "interface");
        assert_eq!(json["properties"][0]["type_ref"]["kind"], "primitive");
        assert_eq!(json["properties"][0]["type_ref"]["of"], "number");

        let back: Declaration = serde_json::from_value(json)?;
        assert_eq!(back, decl);
        Ok(())
    }
}
