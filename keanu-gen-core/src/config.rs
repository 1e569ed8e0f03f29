//! Layered generator configuration.
//!
//! # Resolution order
//!
//! 1. Built-in defaults (output = working directory, extension = `.tpl`).
//! 2. The YAML config file: `--config <file>` when given, otherwise
//!    `<cwd>/.gen_tests_config.yaml` if present. Relative paths inside the
//!    file resolve against the file's own directory.
//! 3. Command-line overrides. Only flags that were actually passed apply.
//!
//! `verbose` is sticky: once any layer enables it, later layers cannot turn
//! it off.
//!
//! ```yaml
//! template-dirs:
//!   - Templates
//!   - Shared/Templates
//! output: ../Tests/KeanuTests
//! extension: .tpl
//! verbose: false
//! ```
//!
//! # API pattern
//!
//! [`resolve_at`] takes the working directory explicitly and is what tests
//! call; [`resolve`] derives it from the process.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{io_err, ConfigError};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".gen_tests_config.yaml";

/// Template suffix used when neither the file nor the command line sets one.
pub const DEFAULT_EXTENSION: &str = ".tpl";

// ---------------------------------------------------------------------------
// File layer
// ---------------------------------------------------------------------------

/// `template-dirs` accepts a YAML list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TemplateDirs {
    List(Vec<PathBuf>),
    Joined(String),
}

impl TemplateDirs {
    fn into_paths(self) -> Vec<PathBuf> {
        match self {
            TemplateDirs::List(paths) => paths,
            TemplateDirs::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
        }
    }
}

/// On-disk config file shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub template_dirs: Option<TemplateDirs>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Load and parse a config file.
pub fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Command-line layer
// ---------------------------------------------------------------------------

/// Values supplied on the command line. Empty / `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub template_dirs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub extension: Option<String>,
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
}

// ---------------------------------------------------------------------------
// Resolved config
// ---------------------------------------------------------------------------

/// Fully resolved, validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Search directories, in lookup order.
    pub template_dirs: Vec<PathBuf>,
    /// Existing directory rendered files are written into.
    pub output: PathBuf,
    /// Template suffix without its leading dot; `None` disables filtering.
    pub extension: Option<String>,
    pub verbose: bool,
    /// The config file that contributed values, if any.
    pub config_file: Option<PathBuf>,
}

/// Resolve configuration relative to an explicit working directory.
pub fn resolve_at(cwd: &Path, overrides: Overrides) -> Result<GeneratorConfig, ConfigError> {
    let mut template_dirs: Vec<PathBuf> = Vec::new();
    let mut output = cwd.to_path_buf();
    let mut extension = Some(DEFAULT_EXTENSION.to_string());
    let mut verbose = overrides.verbose;

    let explicit = overrides.config_file.is_some();
    let candidate = match &overrides.config_file {
        Some(path) => absolutize(cwd, path),
        None => cwd.join(DEFAULT_CONFIG_FILE),
    };
    tracing::debug!("checking {} for config file", candidate.display());

    let mut config_file = None;
    if candidate.is_file() {
        let path = std::fs::canonicalize(&candidate).map_err(|e| io_err(&candidate, e))?;
        let file = load_file(&path)?;
        let base = path.parent().unwrap_or(cwd).to_path_buf();

        verbose |= file.verbose.unwrap_or(false);
        if let Some(dirs) = file.template_dirs {
            template_dirs = dirs
                .into_paths()
                .iter()
                .map(|dir| {
                    let resolved = absolutize(&base, dir);
                    tracing::debug!(
                        "resolved template dir {} to {}",
                        dir.display(),
                        resolved.display()
                    );
                    resolved
                })
                .collect();
        }
        if let Some(out) = file.output {
            output = absolutize(&base, &out);
        }
        if let Some(ext) = file.extension {
            extension = Some(ext);
        }
        config_file = Some(path);
    } else if explicit {
        return Err(ConfigError::ConfigNotFound { path: candidate });
    }

    if !overrides.template_dirs.is_empty() {
        template_dirs = overrides
            .template_dirs
            .iter()
            .map(|dir| absolutize(cwd, dir))
            .collect();
    }
    if let Some(out) = overrides.output {
        output = absolutize(cwd, &out);
    }
    if let Some(ext) = overrides.extension {
        extension = Some(ext);
    }

    let config = GeneratorConfig {
        template_dirs,
        output,
        extension: extension.and_then(normalize_extension),
        verbose,
        config_file,
    };
    tracing::debug!("resolved configuration: {config:#?}");
    validate(&config)?;
    Ok(config)
}

/// Resolve configuration relative to the process working directory.
pub fn resolve(overrides: Overrides) -> Result<GeneratorConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    resolve_at(&cwd, overrides)
}

fn validate(config: &GeneratorConfig) -> Result<(), ConfigError> {
    if config.template_dirs.is_empty() {
        return Err(ConfigError::NoTemplateDirs);
    }
    if !config.output.is_dir() {
        return Err(ConfigError::OutputNotDirectory {
            path: config.output.clone(),
        });
    }
    Ok(())
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Strip one leading dot; an empty extension disables filtering.
fn normalize_extension(ext: String) -> Option<String> {
    let trimmed = ext.strip_prefix('.').unwrap_or(&ext);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_extension_strips_single_dot() {
        assert_eq!(normalize_extension(".tpl".into()), Some("tpl".into()));
        assert_eq!(normalize_extension("tpl".into()), Some("tpl".into()));
        assert_eq!(normalize_extension("..j2".into()), Some(".j2".into()));
        assert_eq!(normalize_extension(".".into()), None);
        assert_eq!(normalize_extension(String::new()), None);
    }

    #[test]
    fn joined_template_dirs_split_on_commas() {
        let dirs = TemplateDirs::Joined("a, b/c ,,d".into()).into_paths();
        assert_eq!(dirs, vec![PathBuf::from("a"), PathBuf::from("b/c"), PathBuf::from("d")]);
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let base = Path::new("/base");
        assert_eq!(absolutize(base, Path::new("/abs")), PathBuf::from("/abs"));
        assert_eq!(absolutize(base, Path::new("rel")), PathBuf::from("/base/rel"));
    }

    #[test]
    fn config_file_rejects_unknown_keys() {
        let err = serde_yaml::from_str::<ConfigFile>("outptu: x\n").unwrap_err();
        assert!(err.to_string().contains("outptu"));
    }
}
