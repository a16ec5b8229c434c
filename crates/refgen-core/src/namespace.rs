//! Assembly of declarations into namespaces.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Declaration, NamespaceMember, NamespaceNode, ServiceDescriptor};

/// Default name of the ambient root namespace.
pub const DEFAULT_ROOT_NAMESPACE: &str = "GoogleAppsScript";

/// Whitespace-separated trailing "Service" word.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SERVICE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+service$").unwrap());

/// Identifier of a service namespace derived from its page title.
///
/// A trailing "Service" word is dropped (case-insensitively) and whitespace
/// is removed: `"Spreadsheet Service"` becomes `Spreadsheet`, `"Admin SDK
/// Directory Service"` becomes `AdminSDKDirectory`. A suffix glued to the
/// previous word stays, so `"XmlService"` is kept whole.
pub fn service_namespace_name(title: &str) -> String {
    let title = title.trim();
    SERVICE_SUFFIX_RE
        .replace(title, "")
        .split_whitespace()
        .collect()
}

/// Namespace of one service: members in discovery order, then options types
/// in lift order.
pub fn assemble_service(
    service: &ServiceDescriptor,
    members: impl IntoIterator<Item = Declaration>,
    options: impl IntoIterator<Item = Declaration>,
) -> NamespaceNode {
    let description = service.description.trim();

    NamespaceNode {
        name: service.name.clone(),
        description: (!description.is_empty()).then(|| description.to_string()),
        members: members
            .into_iter()
            .chain(options)
            .map(NamespaceMember::Declaration)
            .collect(),
        ambient: false,
    }
}

/// Wrap service namespaces in the single ambient root namespace.
pub fn wrap_ambient(
    root_name: &str,
    services: impl IntoIterator<Item = NamespaceNode>,
) -> NamespaceNode {
    NamespaceNode {
        name: root_name.to_string(),
        description: None,
        members: services.into_iter().map(NamespaceMember::Namespace).collect(),
        ambient: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclarationClass;

    fn service() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "Spreadsheet".into(),
            description: "Create and modify spreadsheets.".into(),
            source_path: "/apps-script/reference/spreadsheet".into(),
        }
    }

    fn member_names(node: &NamespaceNode) -> Vec<&str> {
        node.members
            .iter()
            .map(|m| match m {
                NamespaceMember::Declaration(d) => d.name.as_str(),
                NamespaceMember::Namespace(n) => n.name.as_str(),
            })
            .collect()
    }

    #[test]
    fn test_namespace_name() {
        assert_eq!(service_namespace_name("Spreadsheet Service"), "Spreadsheet");
        assert_eq!(service_namespace_name("Calendar service"), "Calendar");
        assert_eq!(
            service_namespace_name("Admin SDK Directory Service"),
            "AdminSDKDirectory"
        );
        assert_eq!(service_namespace_name("Base"), "Base");
        assert_eq!(service_namespace_name("Service"), "Service");
        assert_eq!(service_namespace_name("XmlService"), "XmlService");
        assert_eq!(service_namespace_name("Xml  SERVICE"), "Xml");
        assert_eq!(service_namespace_name("Ü"), "Ü");
    }

    #[test]
    fn test_options_after_members() {
        // Given: Three documented members and one lifted options type
        let members = ["Color", "Range", "Sheet"].map(|name| {
            Declaration::skeleton(name, "", DeclarationClass::Interface)
        });
        let options = [Declaration::interface("SetOptionsOptions", "", vec![])];

        // When: Assembling the service namespace
        let node = assemble_service(&service(), members, options);

        // Then: Four members with the options type last
        assert_eq!(
            member_names(&node),
            vec!["Color", "Range", "Sheet", "SetOptionsOptions"]
        );
        assert_eq!(
            node.description.as_deref(),
            Some("Create and modify spreadsheets.")
        );
        assert!(!node.ambient);
    }

    #[test]
    fn test_ambient_root() {
        let node = assemble_service(&service(), [], []);
        let root = wrap_ambient(DEFAULT_ROOT_NAMESPACE, [node]);

        assert!(root.ambient);
        assert_eq!(root.name, "GoogleAppsScript");
        assert_eq!(member_names(&root), vec!["Spreadsheet"]);
    }
}
