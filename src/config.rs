//! Generation options and the optional config file.
//!
//! ```yaml
//! values: chart/values.yaml
//! overrides: ["env/*.yaml"]
//! output: chart/values.schema.json
//! maxDepth: 64
//! mixedArrayOneOf: false
//! ```
//!
//! Relative paths are resolved against the config file's directory.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::inference::InferOptions;
use crate::schema::DEFAULT_SCHEMA_URI;

/// The YAML parser refuses documents nested past 128 levels, so larger limits
/// could never be reached for loaded files.
pub const MAX_DEPTH_CEILING: usize = 100;
pub const DEFAULT_MAX_DEPTH: usize = MAX_DEPTH_CEILING;

// ------------------------------- Options ---------------------------------- //

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub infer: InferOptions,
    /// Injected as the root `$schema`.
    pub schema_uri: String,
    /// Inputs nested deeper than this are rejected before inference.
    pub max_depth: usize,
    /// Replace `items` with a `oneOf` union for arrays of mixed element types.
    pub mixed_array_one_of: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            infer: InferOptions::default(),
            schema_uri: DEFAULT_SCHEMA_URI.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            mixed_array_one_of: true,
        }
    }
}

// ------------------------------ Config file ------------------------------- //

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigFile {
    pub values: Option<PathBuf>,
    /// Literal paths or glob patterns, merged in order.
    pub overrides: Vec<String>,
    pub output: Option<PathBuf>,
    pub schema_uri: Option<String>,
    pub max_depth: Option<usize>,
    pub mixed_array_one_of: Option<bool>,
    pub verbose: bool,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&source).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config.resolve_relative(path.parent().unwrap_or(Path::new("."))))
    }

    pub fn parse(source: &str) -> std::result::Result<Self, String> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        crate::path_de::from_str_with_path(source)
    }

    fn resolve_relative(mut self, dir: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.values = self.values.map(join);
        self.output = self.output.map(join);
        self.overrides = self
            .overrides
            .into_iter()
            .map(|pattern| {
                if Path::new(&pattern).is_relative() {
                    dir.join(&pattern).to_string_lossy().into_owned()
                } else {
                    pattern
                }
            })
            .collect();
        self
    }

    /// Options with the file's settings layered over the defaults.
    pub fn generate_options(&self) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            infer: InferOptions { log_decisions: self.verbose },
            schema_uri: self.schema_uri.clone().unwrap_or(defaults.schema_uri),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            mixed_array_one_of: self.mixed_array_one_of.unwrap_or(defaults.mixed_array_one_of),
        }
    }
}
