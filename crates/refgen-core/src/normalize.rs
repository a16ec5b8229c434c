//! Mapping of documented type tokens to target type references.
//!
//! The reference pages spell types the way the scripting platform documents
//! them (`Integer`, `String[]`, `Object`, `Spreadsheet`). [`normalize`] maps
//! such a token to a [`TypeRef`] of the declaration vocabulary:
//!
//! ```rust
//! use refgen_core::normalize::{normalize, is_map_shaped};
//! use refgen_core::TypeRef;
//!
//! assert_eq!(
//!     normalize("Integer[]"),
//!     TypeRef::array_of(TypeRef::primitive("number"))
//! );
//! assert_eq!(normalize("Range"), TypeRef::named("Range"));
//! assert!(is_map_shaped("Object"));
//! ```
//!
//! Unknown tokens never fail; they pass through as named references.

use crate::types::TypeRef;

/// Trailing marker of array-shaped tokens.
pub const ARRAY_MARKER: &str = "[]";

/// Documented spellings and their target primitives.
const SYNONYMS: &[(&str, &str)] = &[
    ("Integer", "number"),
    ("String", "string"),
    ("Boolean", "boolean"),
    ("Object", "object"),
];

/// Primitives of the target vocabulary, recognized as themselves.
const PRIMITIVES: &[&str] = &[
    "number", "string", "boolean", "object", "void", "unknown", "any",
];

/// Normalize a documented type token.
///
/// Each trailing `[]` becomes one [`TypeRef::Array`] layer around the
/// normalized element type. An empty token (no documented return) is `void`.
pub fn normalize(token: &str) -> TypeRef {
    let token = token.trim();
    if let Some(element) = token.strip_suffix(ARRAY_MARKER) {
        return TypeRef::array_of(normalize(element));
    }
    if token.is_empty() {
        return TypeRef::void();
    }

    if let Some((_, target)) = SYNONYMS.iter().find(|(documented, _)| *documented == token) {
        return TypeRef::primitive(*target);
    }
    if PRIMITIVES.contains(&token) {
        return TypeRef::primitive(token);
    }
    TypeRef::named(token)
}

/// Whether the token carries the trailing array marker.
pub fn is_array_shaped(token: &str) -> bool {
    token.trim().ends_with(ARRAY_MARKER)
}

/// Whether the token documents an untyped dictionary.
///
/// Only the exact, case-sensitive spelling `Object` qualifies.
pub fn is_map_shaped(token: &str) -> bool {
    token.trim() == "Object"
}

/// Remove every trailing array marker.
pub fn unbox(token: &str) -> &str {
    let mut token = token.trim();
    while let Some(element) = token.strip_suffix(ARRAY_MARKER) {
        token = element.trim_end();
    }
    token
}

/// Uppercase the first character of a word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_synonyms() {
        assert_eq!(normalize("Integer"), TypeRef::primitive("number"));
        assert_eq!(normalize("String"), TypeRef::primitive("string"));
        assert_eq!(normalize("Boolean"), TypeRef::primitive("boolean"));
        assert_eq!(normalize("Object"), TypeRef::primitive("object"));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            normalize("Integer[]"),
            TypeRef::array_of(TypeRef::primitive("number"))
        );
        assert_eq!(
            normalize("Range[][]"),
            TypeRef::array_of(TypeRef::array_of(TypeRef::named("Range")))
        );
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(normalize("Spreadsheet"), TypeRef::named("Spreadsheet"));
        assert_eq!(normalize("integer"), TypeRef::named("integer"));
    }

    #[test]
    fn test_empty_is_void() {
        assert_eq!(normalize(""), TypeRef::void());
        assert_eq!(normalize("   "), TypeRef::void());
    }

    #[test]
    fn test_shape_predicates() {
        assert!(is_array_shaped("String[]"));
        assert!(!is_array_shaped("String"));

        assert!(is_map_shaped("Object"));
        assert!(!is_map_shaped("Object[]"));
        assert!(!is_map_shaped("String"));
        assert!(!is_map_shaped("object"));
    }

    #[test]
    fn test_unbox_and_capitalize() {
        assert_eq!(unbox("String[]"), "String");
        assert_eq!(unbox("values[][]"), "values");
        assert_eq!(unbox("Range"), "Range");

        assert_eq!(capitalize("setOptions"), "SetOptions");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émoji"), "Émoji");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(
            base in prop_oneof![
                Just("Integer".to_string()),
                Just("String".to_string()),
                Just("Boolean".to_string()),
                Just("Object".to_string()),
                Just("void".to_string()),
                "[A-Z][A-Za-z0-9]{0,12}",
            ],
            depth in 0usize..3,
        ) {
            let token = format!("{base}{}", ARRAY_MARKER.repeat(depth));
            let once = normalize(&token);
            let twice = normalize(&once.to_string());
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn test_normalize_is_pure(token in "[A-Za-z]{1,10}(\\[\\])?") {
            prop_assert_eq!(normalize(&token), normalize(&token));
        }
    }
}
