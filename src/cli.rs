//! Minimal CLI: metadata table → (Flow declarations | lint report)
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::warn;

use crate::config::{BuilderExclusions, Config};
use crate::metadata::Metadata;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Flow declarations for a Babel-style AST node table
#[derive(Parser, Debug)]
#[command(name = "babel-flow-decls")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit the declaration file
    Generate(GenerateOut),
    /// report inconsistencies in the metadata table
    Lint(MetadataSettings),
}

#[derive(Args, Debug, Clone)]
struct MetadataSettings {
    /// JSON file holding NODE_FIELDS, BUILDER_KEYS, FLIPPED_ALIAS_KEYS and TYPES
    #[arg(long, short)]
    metadata: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    metadata_settings: MetadataSettings,

    /// output file, replaced wholesale
    #[arg(short, long, default_value = "lib/types.js")]
    out: PathBuf,

    /// print to stdout instead of writing `--out`
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// fail if `--out` differs from what would be generated; writes nothing
    #[arg(long)]
    check: bool,

    /// prefix for class and alias names
    #[arg(long, default_value = crate::config::DEFAULT_NODE_PREFIX)]
    node_prefix: String,

    /// name of the `declare module` block
    #[arg(long, default_value = crate::config::DEFAULT_MODULE_NAME)]
    module_name: String,

    /// node type that gets no builder declaration (repeatable; replaces the default Super, Import)
    #[arg(long = "skip-builder")]
    skip_builders: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl MetadataSettings {
    fn load(&self) -> crate::Result<Metadata> {
        let metadata = Metadata::from_path(&self.metadata)?;
        for warning in metadata.lint() {
            warn!("{warning}");
        }
        Ok(metadata)
    }
}

impl GenerateOut {
    fn config(&self) -> Config {
        let exclusions = if self.skip_builders.is_empty() {
            BuilderExclusions::default()
        } else {
            BuilderExclusions::new(self.skip_builders.iter().cloned())
        };
        Config::new()
            .node_prefix(&self.node_prefix)
            .module_name(&self.module_name)
            .builder_exclusions(exclusions)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let metadata = target.metadata_settings.load()?;
                let config = target.config();

                if target.stdout {
                    let src = crate::generate(&metadata, &config)?;
                    print!("{src}");
                } else if target.check {
                    crate::check_declarations(&target.out, &metadata, &config)?;
                    eprintln!("{} {}", "up to date:".green(), target.out.display());
                } else {
                    crate::write_declarations(&target.out, &metadata, &config)?;
                }
            }
            Command::Lint(settings) => {
                let metadata = Metadata::from_path(&settings.metadata)?;
                report_lint(&settings.metadata, &metadata);
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_lint(path: &Path, metadata: &Metadata) {
    let warnings = metadata.lint();
    if warnings.is_empty() {
        eprintln!("{} {}", "clean:".green(), path.display());
        return;
    }
    for warning in &warnings {
        println!("{} {warning}", "warning:".yellow());
    }
    eprintln!("{} warning(s) in {}", warnings.len(), path.display());
}
