// Strongly-typed declaration IR. No metadata or serde_json::Value here;
// names are already prefixed and literals already rendered.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowType {
    Any,
    /// rendered literals, e.g. `"+"`, `1`, `true`
    Literals(Vec<String>),
    /// primitive type name taken verbatim from the validator
    Named(String),
    /// `Array<any>`
    ArrayOfAny,
    /// prefixed node classes; `nullable` marks the whole union
    NodeUnion { members: Vec<String>, nullable: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// raw field name as it appears in the table
    pub name: String,
    /// safe parameter name for the builder
    pub binding: String,
    pub optional: bool,
    pub ty: FlowType,
    /// false when the raw name needs escaping; kept out of the class body
    pub in_class: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub node_type: String,
    pub class_name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderDecl {
    pub fn_name: String,
    pub params: Vec<Member>,
    pub returns: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateDecl {
    pub name: String,
    /// prefixed class the predicate narrows to, when `name` is a node type
    pub refines: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDecl {
    pub name: String,
    pub members: Vec<String>,
}

/// Everything the codegen pass prints, in print order per section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationDocument {
    pub classes: Vec<ClassDecl>,
    pub builders: Vec<BuilderDecl>,
    pub predicates: Vec<PredicateDecl>,
    pub aliases: Vec<AliasDecl>,
}

impl FlowType {
    pub fn is_empty(&self) -> bool {
        self.to_string().is_empty()
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowType::Any => f.write_str("any"),
            FlowType::Literals(lits) => f.write_str(&lits.join(" | ")),
            FlowType::Named(name) => f.write_str(name),
            FlowType::ArrayOfAny => f.write_str("Array<any>"),
            FlowType::NodeUnion { members, nullable } => {
                if *nullable {
                    f.write_str("?")?;
                }
                f.write_str(&members.join(" | "))
            }
        }
    }
}

impl Member {
    /// `?: T` style suffix shared by class members and builder params.
    pub fn suffix(&self) -> String {
        let mut out = String::new();
        if self.optional {
            out.push('?');
        }
        if !self.ty.is_empty() {
            out.push_str(": ");
            out.push_str(&self.ty.to_string());
        }
        out
    }

    pub fn class_line(&self) -> String {
        format!("{}{};", self.name, self.suffix())
    }

    pub fn param(&self) -> String {
        format!("{}{}", self.binding, self.suffix())
    }
}
