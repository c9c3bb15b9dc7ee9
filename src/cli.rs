//! CLI: values (+ overrides) → (schema | merged values)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{ConfigFile, GenerateOptions};
use crate::value::ValueNode;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a JSON schema for a chart's values file, using the file itself as the baseline for `required`
#[derive(Parser, Debug)]
#[command(name = "values-schema", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and write the values schema
    Schema(SchemaOut),
    /// print the merged values as JSON
    Merge(MergeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// base values file (YAML or JSON); also the baseline that decides `required`
    #[arg(long)]
    values: Option<PathBuf>,

    /// override files merged over the base in order. May be literal paths or quoted glob patterns
    #[arg(long = "override", short = 'f', num_args = 1..)]
    overrides: Vec<String>,

    /// config file (YAML or JSON); flags take precedence over it
    #[arg(long)]
    config: Option<PathBuf>,

    /// debug-level logs, including why each key is or isn't required
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// reject inputs nested deeper than this (at most 100)
    #[arg(long)]
    max_depth: Option<usize>,

    /// `$schema` URI written at the root
    #[arg(long)]
    schema_uri: Option<String>,

    /// keep first-element `items` for mixed-type arrays instead of a `oneOf`
    #[arg(long)]
    no_one_of: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct MergeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Inputs after layering flags over the config file.
struct Loaded {
    config: ConfigFile,
    base: ValueNode,
    overrides: Vec<ValueNode>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<Loaded> {
        let config = match self.config.as_ref() {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        crate::logging::init(self.verbose || config.verbose);

        let values_path = self
            .values
            .clone()
            .or_else(|| config.values.clone())
            .context("no values file given (use --values or set `values` in the config file)")?;
        let patterns = if self.overrides.is_empty() { &config.overrides } else { &self.overrides };
        let override_paths = resolve_file_path_patterns(patterns)?;

        info!(path = %values_path.display(), "loading base values");
        let base = crate::loader::load_values(&values_path)?;
        let mut overrides = Vec::with_capacity(override_paths.len());
        for path in &override_paths {
            info!(path = %path.display(), "loading override");
            overrides.push(crate::loader::load_values(path)?);
        }

        Ok(Loaded { config, base, overrides })
    }
}

impl SchemaOut {
    fn options(&self, config: &ConfigFile) -> GenerateOptions {
        let mut opts = config.generate_options();
        if self.input_settings.verbose {
            opts.infer.log_decisions = true;
        }
        if let Some(max_depth) = self.max_depth {
            opts.max_depth = max_depth;
        }
        if let Some(uri) = self.schema_uri.as_ref() {
            opts.schema_uri = uri.clone();
        }
        if self.no_one_of {
            opts.mixed_array_one_of = false;
        }
        opts
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) load + layer settings
                let loaded = target.input_settings.load()?;
                let opts = target.options(&loaded.config);

                // 2) merge, infer & prune
                let schema = crate::assemble::generate(&loaded.base, &loaded.overrides, &opts)?;
                let schema_src = crate::assemble::to_json_pretty(&schema)?;

                // 3) write
                let out = target.out.as_ref().or(loaded.config.output.as_ref());
                write_output(out.map(PathBuf::as_path), &schema_src)
            }
            Command::Merge(target) => {
                let loaded = target.input_settings.load()?;
                let merged = crate::merge::merge_layers(&loaded.base, &loaded.overrides);
                let merged_src = serde_json::to_string_pretty(&merged)?;
                write_output(target.out.as_deref(), &merged_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "wrote output");
        }
        None => println!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> crate::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // glob results come back sorted, which fixes the merge order
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(crate::Error::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
