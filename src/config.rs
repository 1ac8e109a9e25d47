//! Configuration for declaration emission.
use indexmap::IndexSet;

pub const DEFAULT_NODE_PREFIX: &str = "BabelNode";
pub const DEFAULT_MODULE_NAME: &str = "babel-types";

/// Node types whose builder declarations do not survive the Flow checker
/// (`super()` and `import()` parse as syntax, not calls).
pub const DEFAULT_BUILDER_EXCLUSIONS: &[&str] = &["Super", "Import"];

/// Node types that get a class but no builder function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderExclusions(IndexSet<String>);

impl BuilderExclusions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self(IndexSet::new())
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.0.contains(node_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for BuilderExclusions {
    fn default() -> Self {
        Self::new(DEFAULT_BUILDER_EXCLUSIONS.iter().copied())
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Prepended to every node class and alias name
    pub(crate) node_prefix: String,
    /// Name of the `declare module` block
    pub(crate) module_name: String,
    pub(crate) builder_exclusions: BuilderExclusions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_prefix: DEFAULT_NODE_PREFIX.to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            builder_exclusions: BuilderExclusions::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_prefix(mut self, value: impl Into<String>) -> Self {
        self.node_prefix = value.into();
        self
    }

    pub fn module_name(mut self, value: impl Into<String>) -> Self {
        self.module_name = value.into();
        self
    }

    pub fn builder_exclusions(mut self, value: BuilderExclusions) -> Self {
        self.builder_exclusions = value;
        self
    }

    /// `<prefix><name>`, the class or alias name for a node type.
    pub fn prefixed(&self, name: &str) -> String {
        format!("{}{}", self.node_prefix, name)
    }

    pub fn exclusions(&self) -> &BuilderExclusions {
        &self.builder_exclusions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exclusions_are_super_and_import() {
        let ex = BuilderExclusions::default();
        assert!(ex.contains("Super"));
        assert!(ex.contains("Import"));
        assert!(!ex.contains("Identifier"));
        assert_eq!(ex.iter().collect::<Vec<_>>(), ["Super", "Import"]);
    }

    #[test]
    fn builder_setters_override_defaults() {
        let cfg = Config::new()
            .node_prefix("Ast")
            .module_name("my-ast")
            .builder_exclusions(BuilderExclusions::none());
        assert_eq!(cfg.prefixed("Identifier"), "AstIdentifier");
        assert_eq!(cfg.module_name, "my-ast");
        assert!(!cfg.exclusions().contains("Super"));
    }
}
