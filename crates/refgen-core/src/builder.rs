//! Two-phase construction of declarations.
//!
//! Phase one turns the member table of a service page into classified,
//! empty skeletons. Phase two fills a skeleton from its detail page. The two
//! phases are separate so that a failed detail fetch still leaves a usable
//! (empty) declaration in the output.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::classify::{classify, is_enum_description};
use crate::doc_comment::{DocInput, split_return, synthesize};
use crate::extract::{DetailPage, FieldRow, MemberRow, MethodBlock};
use crate::lift::{enum_value_of, lift_options, options_type_name, should_lift};
use crate::normalize::{is_map_shaped, normalize};
use crate::types::{
    Declaration, DeclarationKind, EnumMember, MethodDeclaration, ParameterDeclaration,
    PropertyDeclaration, TypeRef,
};

/// Declarations keyed by detail path, in listing order.
pub type Skeletons = IndexMap<String, Declaration>;

/// Build one classified skeleton per member row.
///
/// Rows without a detail link cannot be populated and are skipped. When two
/// rows share a detail path the first position is kept with the last row's
/// skeleton.
pub fn build_skeletons(rows: &[MemberRow]) -> Skeletons {
    let mut skeletons = Skeletons::with_capacity(rows.len());

    for row in rows {
        let Some(path) = &row.detail_path else {
            warn!(member = %row.name, "member row has no detail link, skipping");
            continue;
        };

        let class = classify(&row.description);
        debug!(member = %row.name, ?class, %path, "built skeleton");
        skeletons.insert(
            path.clone(),
            Declaration::skeleton(&row.name, &row.description, class),
        );
    }

    skeletons
}

/// Fill a skeleton from its detail page.
///
/// The declaration's contents are replaced, never appended to, so populating
/// twice from the same page gives the same result. Options types lifted from
/// advanced parameter tables are returned in encounter order.
pub fn populate(decl: &mut Declaration, detail: &DetailPage) -> Vec<Declaration> {
    let mut options = Vec::new();

    match &mut decl.kind {
        DeclarationKind::Enum { members } => {
            *members = detail.fields.iter().map(enum_member).collect();
        },
        DeclarationKind::Interface {
            properties,
            methods,
        } => {
            *properties = detail.fields.iter().map(property).collect();
            *methods = detail
                .methods
                .iter()
                .map(|block| method(block, &mut options))
                .collect();
        },
    }

    options
}

fn enum_member(row: &FieldRow) -> EnumMember {
    EnumMember {
        name: row.name.clone(),
        description: row.description.clone(),
        value: None,
    }
}

fn property(row: &FieldRow) -> PropertyDeclaration {
    let type_ref = if is_enum_description(&row.description) {
        enum_value_of(&row.type_name)
    } else {
        normalize(&row.type_name)
    };

    PropertyDeclaration {
        name: row.name.clone(),
        type_ref,
        description: row.description.clone(),
        optional: false,
    }
}

fn method(block: &MethodBlock, options: &mut Vec<Declaration>) -> MethodDeclaration {
    let name = block.method_name().to_string();

    let parameters = block
        .params
        .iter()
        .map(|param| {
            let type_ref = if should_lift(param) {
                options.push(lift_options(&name, param, &block.advanced_params));
                TypeRef::named(options_type_name(&name))
            } else if is_map_shaped(&param.type_name) {
                TypeRef::unknown_map()
            } else {
                normalize(&param.type_name)
            };
            ParameterDeclaration::new(&param.name, type_ref)
        })
        .collect::<Vec<_>>();

    let (return_token, return_description) = split_return(&block.returns);

    let parameter_names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
    let parameter_descriptions: Vec<String> =
        block.params.iter().map(|p| p.description.clone()).collect();
    let doc = synthesize(&DocInput {
        summary: &block.summary,
        example: &block.example,
        parameter_names: &parameter_names,
        parameter_descriptions: &parameter_descriptions,
        return_description: return_description.as_deref(),
    });

    MethodDeclaration {
        name,
        parameters,
        return_type: normalize(&return_token),
        description: block.summary.clone(),
        example: (!block.example.is_empty()).then(|| block.example.clone()),
        return_description,
        doc,
    }
}
