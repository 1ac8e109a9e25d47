//! Renders a `DeclarationDocument` as a Flow library definition.
//!
//! Output is an append-only list of segments joined once by `into_string`.
//! Layout is part of the contract: identical input must give identical bytes.
use crate::config::Config;
use crate::ir::{AliasDecl, BuilderDecl, ClassDecl, DeclarationDocument, PredicateDecl};

const HEADER: &str = "// NOTE: This file is autogenerated. Do not modify.\n\
// Generated by babel-flow-decls from the node-definition table.\n\n";

/// Signatures exported next to the builders and predicates.
const UTILITIES: &[&str] = &[
    "declare function validate(n: BabelNode, key: string, value: mixed): void;",
    "declare function clone<T>(n: T): T;",
    "declare function cloneDeep<T>(n: T): T;",
    "declare function removeProperties<T>(n: T, opts: ?{}): void;",
    "declare function removePropertiesDeep<T>(n: T, opts: ?{}): T;",
];

pub struct Codegen<'a> {
    config: &'a Config,
    segments: Vec<String>,
}

impl<'a> Codegen<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, segments: Vec::new() }
    }

    pub fn emit(&mut self, doc: &DeclarationDocument) {
        self.emit_preamble();
        for class in &doc.classes {
            self.emit_class(class);
        }
        for alias in &doc.aliases {
            self.emit_alias(alias);
        }
        self.emit_module(doc);
    }

    pub fn into_string(self) -> String {
        self.segments.concat()
    }

    fn emit_preamble(&mut self) {
        let p = &self.config.node_prefix;
        self.segments.push(HEADER.to_string());
        self.segments.push(format!(
            "declare class {p}Comment {{
  value: string;
  start: number;
  end: number;
  loc: {p}SourceLocation;
}}

declare class {p}BlockComment extends {p}Comment {{
  type: \"BlockComment\";
}}

declare class {p}LineComment extends {p}Comment {{
  type: \"LineComment\";
}}

declare class {p}SourceLocation {{
  start: {{
    line: number;
    column: number;
  }};

  end: {{
    line: number;
    column: number;
  }};
}}

declare class {p} {{
  leadingComments: ?Array<{p}Comment>;
  innerComments: ?Array<{p}Comment>;
  trailingComments: ?Array<{p}Comment>;
  start: ?number;
  end: ?number;
  loc: ?{p}SourceLocation;
}}

"
        ));
    }

    fn emit_class(&mut self, class: &ClassDecl) {
        let mut body = vec![format!("type: \"{}\";", class.node_type)];
        body.extend(class.members.iter().filter(|m| m.in_class).map(|m| m.class_line()));
        self.segments.push(format!(
            "declare class {} extends {} {{\n  {}\n}}\n\n",
            class.class_name,
            self.config.node_prefix,
            body.join("\n  "),
        ));
    }

    fn emit_alias(&mut self, alias: &AliasDecl) {
        let rhs = if alias.members.is_empty() { "empty".to_string() } else { alias.members.join(" | ") };
        self.segments.push(format!("type {} = {};\n", alias.name, rhs));
    }

    fn emit_module(&mut self, doc: &DeclarationDocument) {
        let mut lines: Vec<String> = Vec::new();
        lines.extend(doc.builders.iter().map(builder_line));
        lines.extend(doc.predicates.iter().map(predicate_line));
        lines.extend(UTILITIES.iter().map(|u| u.replace("BabelNode", &self.config.node_prefix)));

        self.segments.push(format!(
            "\ndeclare module \"{}\" {{\n  {}\n}}\n",
            self.config.module_name,
            lines.join("\n  "),
        ));
    }
}

fn builder_line(b: &BuilderDecl) -> String {
    let params: Vec<String> = b.params.iter().map(|m| m.param()).collect();
    format!("declare function {}({}): {};", b.fn_name, params.join(", "), b.returns)
}

fn predicate_line(p: &PredicateDecl) -> String {
    let mut decl = format!("declare function is{}(node: Object, opts?: ?Object): boolean", p.name);
    if let Some(class) = &p.refines {
        decl.push_str(&format!(" %checks (node instanceof {class})"));
    }
    decl
}
