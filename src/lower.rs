use indexmap::IndexMap;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::identifier::{is_valid_identifier, to_binding_identifier_name};
use crate::ir::{AliasDecl, BuilderDecl, ClassDecl, DeclarationDocument, FlowType, Member, PredicateDecl};
use crate::metadata::{FieldSpec, Metadata};

pub fn lower_to_ir(metadata: &Metadata, config: &Config) -> Result<DeclarationDocument> {
    let mut doc = DeclarationDocument::default();

    for (node_type, fields) in &metadata.node_fields {
        if node_type.is_empty() {
            return Err(Error::EmptyTypeName);
        }
        let class_name = config.prefixed(node_type);
        let members = lower_fields(node_type, fields, metadata.builder_keys_for(node_type), config)?;

        if config.exclusions().contains(node_type) {
            debug!(node_type = %node_type, "skipping builder declaration");
        } else {
            doc.builders.push(BuilderDecl {
                fn_name: builder_name(node_type),
                params: members.clone(),
                returns: class_name.clone(),
            });
        }

        doc.classes.push(ClassDecl { node_type: node_type.clone(), class_name, members });
    }

    doc.predicates = metadata
        .types
        .iter()
        .map(|name| PredicateDecl {
            name: name.clone(),
            refines: metadata.is_node_type(name).then(|| config.prefixed(name)),
        })
        .collect();

    doc.aliases = metadata
        .flipped_alias_keys
        .iter()
        .map(|(alias, members)| AliasDecl {
            name: config.prefixed(alias),
            members: members.iter().map(|m| config.prefixed(m)).collect(),
        })
        .collect();

    Ok(doc)
}

/// Builder-key order first, then the rest by name.
pub fn order_fields<'a>(fields: impl IntoIterator<Item = &'a str>, builder_keys: &[String]) -> Vec<&'a str> {
    let mut names: Vec<&str> = fields.into_iter().collect();
    names.sort_by_key(|name| {
        let rank = builder_keys.iter().position(|k| k == name).unwrap_or(usize::MAX);
        (rank, *name)
    });
    names
}

/// `Identifier` → `identifier`
pub fn builder_name(node_type: &str) -> String {
    let mut chars = node_type.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_fields(
    node_type: &str,
    fields: &IndexMap<String, FieldSpec>,
    builder_keys: &[String],
    config: &Config,
) -> Result<Vec<Member>> {
    order_fields(fields.keys().map(String::as_str), builder_keys)
        .into_iter()
        .map(|name| {
            let spec = &fields[name];
            let optional = spec.is_optional();
            let ty = annotation(spec, optional, config)?;
            if spec.validate.as_ref().is_some_and(|v| !v.is_recognized()) {
                debug!(node_type, field = name, "unrecognized validator, annotating as any");
            }
            Ok(Member {
                name: name.to_string(),
                binding: to_binding_identifier_name(name),
                optional,
                ty,
                in_class: is_valid_identifier(name),
            })
        })
        .collect()
}

// Later shapes win: oneOfNodeTypes > type > oneOf.
fn annotation(spec: &FieldSpec, optional: bool, config: &Config) -> Result<FlowType> {
    let Some(validate) = &spec.validate else {
        return Ok(FlowType::Any);
    };

    if let Some(types) = &validate.one_of_node_types {
        return Ok(FlowType::NodeUnion {
            members: types.iter().map(|t| config.prefixed(t)).collect(),
            nullable: optional,
        });
    }

    if let Some(name) = validate.primitive_type() {
        return Ok(match name {
            "array" => FlowType::ArrayOfAny,
            other => FlowType::Named(other.to_string()),
        });
    }

    if let Some(values) = &validate.one_of {
        let lits = values
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        return Ok(FlowType::Literals(lits));
    }

    Ok(FlowType::Any)
}
