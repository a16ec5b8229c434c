//! Lifting of inline "advanced parameters" tables into named options types.
//!
//! Some methods take a single `Object` parameter whose accepted keys are
//! documented in a secondary table of the same detail block. Instead of
//! typing the parameter as an opaque dictionary, the rows of that table
//! become the properties of a synthesized interface named after the method.

use crate::classify::{is_array_name, is_enum_description, mentions_advanced_parameters};
use crate::extract::FieldRow;
use crate::normalize::{capitalize, is_array_shaped, is_map_shaped, normalize, unbox};
use crate::types::{Declaration, PropertyDeclaration, TypeRef};

/// Suffix appended to the capitalized method name.
pub const OPTIONS_SUFFIX: &str = "Options";

/// Whether a parameter row should be lifted into an options type.
pub fn should_lift(param: &FieldRow) -> bool {
    is_map_shaped(&param.type_name) && mentions_advanced_parameters(&param.description)
}

/// Name of the options type synthesized for `method`.
pub fn options_type_name(method: &str) -> String {
    format!("{}{OPTIONS_SUFFIX}", capitalize(method))
}

/// Build the options interface for `method` from its advanced rows.
///
/// An empty `rows` slice yields an interface with no properties.
pub fn lift_options(method: &str, param: &FieldRow, rows: &[FieldRow]) -> Declaration {
    let parent_is_array = is_array_shaped(&param.type_name);

    let properties = rows
        .iter()
        .map(|row| lift_row(row, parent_is_array))
        .collect();

    Declaration::interface(options_type_name(method), param.description.clone(), properties)
}

fn lift_row(row: &FieldRow, parent_is_array: bool) -> PropertyDeclaration {
    let name_is_array = is_array_name(&row.name);
    let name = if name_is_array {
        unbox(&row.name).to_string()
    } else {
        row.name.trim().to_string()
    };

    let type_ref = if parent_is_array {
        TypeRef::array_of(normalize(unbox(&row.type_name)))
    } else if is_enum_description(&row.description) {
        enum_value_of(&row.type_name)
    } else {
        normalize(&row.type_name)
    };

    PropertyDeclaration {
        name,
        type_ref,
        description: row.description.clone(),
        optional: false,
    }
}

/// `EnumValueOf` around the normalized spelling of `token`.
pub(crate) fn enum_value_of(token: &str) -> TypeRef {
    TypeRef::EnumValueOf(normalize(token).to_string())
}
