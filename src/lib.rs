//! Generates the Flow library definition for a Babel-style AST type table:
//! one class per node type, one builder per constructible node type, one
//! predicate per known type name, and one union alias per alias group.
//!
//! Pipeline: `Metadata` → `lower::lower_to_ir` → `codegen::Codegen` → text.
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod identifier;
pub mod ir;
pub mod lower;
pub mod metadata;
pub mod path_de;

use std::path::Path;

use tracing::info;

pub use config::{BuilderExclusions, Config};
pub use error::{Error, Result};
pub use metadata::{FieldSpec, LintWarning, Metadata, Validator};

/// Render the complete declaration document. Pure; no I/O.
pub fn generate(metadata: &Metadata, config: &Config) -> Result<String> {
    let doc = lower::lower_to_ir(metadata, config)?;
    Ok(render(&doc, config))
}

/// Render, then replace `path` with the result in a single write.
pub fn write_declarations(path: impl AsRef<Path>, metadata: &Metadata, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let doc = lower::lower_to_ir(metadata, config)?;
    let text = render(&doc, config);
    std::fs::write(path, &text).map_err(|source| Error::Write { path: path.to_path_buf(), source })?;
    info!(
        path = %path.display(),
        bytes = text.len(),
        classes = doc.classes.len(),
        builders = doc.builders.len(),
        predicates = doc.predicates.len(),
        aliases = doc.aliases.len(),
        "wrote declarations"
    );
    Ok(())
}

/// Fail with `Error::Stale` unless `path` already holds exactly what
/// `generate` would produce. Never writes.
pub fn check_declarations(path: impl AsRef<Path>, metadata: &Metadata, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let expected = generate(metadata, config)?;
    match std::fs::read_to_string(path) {
        Ok(current) if current == expected => {
            info!(path = %path.display(), "declarations are up to date");
            Ok(())
        }
        _ => Err(Error::Stale { path: path.to_path_buf() }),
    }
}

fn render(doc: &ir::DeclarationDocument, config: &Config) -> String {
    let mut cg = codegen::Codegen::new(config);
    cg.emit(doc);
    cg.into_string()
}
