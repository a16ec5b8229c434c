//! Heuristic predicates over documentation prose.
//!
//! These depend on the phrasing conventions of the reference site and are
//! kept deliberately narrow.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::ARRAY_MARKER;
use crate::types::DeclarationClass;

/// Literal phrase marking an object parameter with a separate shape table.
pub const ADVANCED_PARAMETERS_MARKER: &str = "advanced parameters";

/// Leading "An enum ..." or "A enum ..." phrase, including "An enumeration".
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ENUM_DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^an?\s+enum").unwrap());

/// Classify a member from its short description.
///
/// ```rust
/// use refgen_core::classify::classify;
/// use refgen_core::DeclarationClass;
///
/// assert_eq!(classify("An enum of colors"), DeclarationClass::Enum);
/// assert_eq!(classify("A builder for charts"), DeclarationClass::Interface);
/// ```
pub fn classify(description: &str) -> DeclarationClass {
    if is_enum_description(description) {
        DeclarationClass::Enum
    } else {
        DeclarationClass::Interface
    }
}

/// Whether a description starts by calling its subject an enum.
pub fn is_enum_description(description: &str) -> bool {
    ENUM_DESCRIPTION_RE.is_match(description.trim_start())
}

/// Whether a parameter description points at an advanced parameter table.
pub fn mentions_advanced_parameters(description: &str) -> bool {
    description.contains(ADVANCED_PARAMETERS_MARKER)
}

/// Whether a documented field name carries the array marker (`labels[]`).
pub fn is_array_name(name: &str) -> bool {
    name.trim().ends_with(ARRAY_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_phrasings() {
        for description in [
            "An enum of colors",
            "an enum representing the sheet types",
            "A enum with a typo",
            "AN   ENUM of things",
            "An enumeration of chart types",
            "  An enum after leading whitespace",
        ] {
            assert_eq!(
                classify(description),
                DeclarationClass::Enum,
                "{description:?} should classify as enum"
            );
        }
    }

    #[test]
    fn test_interface_phrasings() {
        for description in [
            "A builder for X",
            "Access and modify spreadsheet ranges.",
            "Enumerates the sheets of a file",
            "Enum of supported locales",
            "This class is not an enum",
            "",
        ] {
            assert_eq!(
                classify(description),
                DeclarationClass::Interface,
                "{description:?} should classify as interface"
            );
        }
    }

    #[test]
    fn test_advanced_parameter_marker() {
        assert!(mentions_advanced_parameters(
            "a JavaScript object that specifies advanced parameters, as listed below"
        ));
        assert!(mentions_advanced_parameters("advanced parameters for X"));
        assert!(!mentions_advanced_parameters("Advanced Parameters for X"));
        assert!(!mentions_advanced_parameters("the options to apply"));
    }

    #[test]
    fn test_array_name_convention() {
        assert!(is_array_name("labels[]"));
        assert!(!is_array_name("labels"));
        assert!(!is_array_name("[]labels"));
    }
}
