//! Generator configuration.
//!
//! Settings come from an optional TOML file and are completed by the
//! command line (base package, output root, overriding flags).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::entity_parser::is_word_char;
use crate::error::{Error, Result};
use crate::model::DanglingPolicy;

/// Looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG: &str = "erdgen.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<name>.tpl` overrides for the built-in templates.
    pub template_dir: Option<PathBuf>,
    pub dangling: DanglingPolicy,
    /// Extra declared-type to Java-type mappings, e.g. `uuid = "java.util.UUID"`.
    pub types: BTreeMap<String, String>,
}

/// Loads the configuration: the explicit path if given, else
/// [`LOCAL_CONFIG`] inside `search_dir` if present, else defaults.
///
/// # Errors
///
/// Returns an error if the explicit file is missing or unreadable, or if
/// the chosen file is not valid TOML for [`Config`].
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local = search_dir.join(LOCAL_CONFIG);
    if local.is_file() {
        info!(path = local.display().to_string(); "Loading configuration from local path");
        return load_config_file(&local);
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything the generator needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub base_package: String,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
    pub dangling: DanglingPolicy,
    /// Keys are lowercase.
    pub types: BTreeMap<String, String>,
}

impl GeneratorConfig {
    pub fn new(
        base_package: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        config: Config,
    ) -> Result<Self> {
        let base_package = base_package.into();
        if !is_valid_package(&base_package) {
            return Err(Error::InvalidPackage(base_package));
        }

        Ok(Self {
            base_package,
            output_dir: output_dir.into(),
            template_dir: config.template_dir,
            dangling: config.dangling,
            types: config
                .types
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        })
    }

    /// `com.example.shop` becomes `com/example/shop`.
    pub fn package_path(&self) -> PathBuf {
        self.base_package.split('.').collect()
    }

    /// Build artifact name: the output directory's own name.
    pub fn artifact_id(&self) -> String {
        self.output_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app".to_string())
    }
}

fn is_valid_package(package: &str) -> bool {
    package.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| (c.is_alphabetic() || c == '_') && chars.all(is_word_char))
    })
}
