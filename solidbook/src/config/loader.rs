//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Read raw text (size limit, UTF-8 BOM stripped)
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing into the typed [`SiteConfig`]
//! 4. Command-line overrides and relative path resolution
//! 5. Validation
//! 6. Freeze with `Arc`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use solidbook_core::config::schema::SiteConfig;

use crate::config::validation::validate_site;
use crate::error::ConfigError;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "solidbook.yaml";

// ============================================================================
// Public API
// ============================================================================

/// Values given on the command line, applied over the file's values.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `content_dir`.
    pub content_dir: Option<PathBuf>,
    /// Replaces `out_dir`.
    pub out_dir: Option<PathBuf>,
    /// Replaces `server.bind`.
    pub bind: Option<String>,
}

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
    /// Command-line overrides.
    pub overrides: ConfigOverrides,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("SOLIDBOOK_MAX_CONFIG_SIZE", 1024 * 1024),
            overrides: ConfigOverrides::default(),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<SiteConfig>,

    /// File the configuration came from, if any.
    pub source: Option<PathBuf>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full loading pipeline from YAML file to frozen `SiteConfig`.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Resolves and loads the effective configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present and built-in defaults
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if loading the
    /// chosen file fails (see [`ConfigLoader::load`]).
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<LoadResult, ConfigError> {
        match explicit {
            Some(path) => self.load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    self.load(default)
                } else {
                    self.finish(SiteConfig::default(), None, Path::new("."), Vec::new())
                }
            }
        }
    }

    /// Loads a configuration file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - A required environment variable is unset
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw_content, path)?;
        warnings.extend(env_sub.warnings);

        // An empty file (or one holding only comments) means "all defaults".
        let config: SiteConfig = if substituted.trim().is_empty() {
            SiteConfig::default()
        } else {
            let value: serde_yaml::Value =
                serde_yaml::from_str(&substituted).map_err(|e| parse_error(path, &e))?;
            if value.is_null() {
                SiteConfig::default()
            } else {
                serde_yaml::from_value(value).map_err(|e| ConfigError::ParseError {
                    path: path.to_path_buf(),
                    line: e.location().map(|l| l.line()),
                    message: format!("failed to deserialize configuration: {e}"),
                })?
            }
        };

        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        self.finish(config, Some(path.to_path_buf()), base_dir, warnings)
    }

    /// Applies overrides, resolves relative paths, validates and freezes.
    fn finish(
        &self,
        mut config: SiteConfig,
        source: Option<PathBuf>,
        base_dir: &Path,
        mut warnings: Vec<LoadWarning>,
    ) -> Result<LoadResult, ConfigError> {
        // A content_dir from the file is relative to the file; one from the
        // command line is relative to the working directory.
        if let Some(dir) = config.content_dir.take() {
            config.content_dir = Some(if dir.is_relative() {
                base_dir.join(dir)
            } else {
                dir
            });
        }

        let overrides = &self.options.overrides;
        if let Some(dir) = &overrides.content_dir {
            config.content_dir = Some(dir.clone());
        }
        if let Some(out) = &overrides.out_dir {
            config.out_dir.clone_from(out);
        }
        if let Some(bind) = &overrides.bind {
            config.server.bind.clone_from(bind);
        }

        let result = validate_site(&config);
        let location = source.as_ref().map_or_else(
            || "<defaults>".to_string(),
            |p| p.display().to_string(),
        );

        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: location,
                errors: result.errors,
            });
        }

        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(LoadResult {
            config: Arc::new(config),
            source,
            warnings,
        })
    }
}

fn parse_error(path: &Path, e: &serde_yaml::Error) -> ConfigError {
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    }
}

// ============================================================================
// Environment Substitution
// ============================================================================

/// Expands `${...}` references in raw YAML text.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = Self::parse_var_spec(&mut chars, source_path)?;

                    match std::env::var(&spec.name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => match spec.fallback {
                            Fallback::Default(default) => result.push_str(&default),
                            Fallback::Required(message) => {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: spec.name,
                                    location: if message.is_empty() {
                                        source_path.display().to_string()
                                    } else {
                                        format!("{}: {message}", source_path.display())
                                    },
                                });
                            }
                            Fallback::Empty => self.warnings.push(LoadWarning {
                                message: format!(
                                    "environment variable '{}' is not set, using empty string",
                                    spec.name
                                ),
                                location: Some(source_path.display().to_string()),
                            }),
                        },
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses the inside of `${...}` up to and including the closing brace.
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
        source_path: &Path,
    ) -> Result<VarSpec, ConfigError> {
        let mut name = String::new();

        while let Some(c) = chars.next() {
            match c {
                '}' => {
                    return Ok(VarSpec {
                        name,
                        fallback: Fallback::Empty,
                    });
                }
                ':' if chars.peek() == Some(&'-') => {
                    chars.next();
                    let default = Self::read_until_close(chars, source_path)?;
                    return Ok(VarSpec {
                        name,
                        fallback: Fallback::Default(default),
                    });
                }
                ':' if chars.peek() == Some(&'?') => {
                    chars.next();
                    let message = Self::read_until_close(chars, source_path)?;
                    return Ok(VarSpec {
                        name,
                        fallback: Fallback::Required(message),
                    });
                }
                _ => name.push(c),
            }
        }

        Err(ConfigError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: format!("unclosed environment variable reference: ${{{name}"),
        })
    }

    /// Reads content until the matching `}`, allowing nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
        source_path: &Path,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                }
                _ => {}
            }
            value.push(c);
        }

        Err(ConfigError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: "unclosed environment variable reference".to_string(),
        })
    }
}

struct VarSpec {
    name: String,
    fallback: Fallback,
}

enum Fallback {
    Empty,
    Default(String),
    Required(String),
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn substitute(raw: &str) -> (Result<String, ConfigError>, Vec<LoadWarning>) {
        let mut sub = EnvSubstitution::new();
        let result = sub.substitute(raw, Path::new("test.yaml"));
        (result, sub.warnings)
    }

    #[test]
    fn test_env_substitution_simple() {
        // PATH is always set
        let (result, warnings) = substitute("path: ${PATH}");
        let result = result.unwrap();
        assert!(!result.contains("${PATH}"));
        assert!(result.len() > "path: ".len());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_env_substitution_default() {
        let (result, _) = substitute("value: ${SOLIDBOOK_TEST_NONEXISTENT_XYZ123:-default}");
        assert_eq!(result.unwrap(), "value: default");
    }

    #[test]
    fn test_env_substitution_nested_braces_in_default() {
        let (result, _) = substitute("v: ${SOLIDBOOK_TEST_NONEXISTENT_XYZ123:-{a}}");
        assert_eq!(result.unwrap(), "v: {a}");
    }

    #[test]
    fn test_env_substitution_required_missing() {
        let (result, _) = substitute("value: ${SOLIDBOOK_TEST_REQUIRED_XYZ123:?must be set}");
        match result {
            Err(ConfigError::EnvVarNotSet { var, location }) => {
                assert_eq!(var, "SOLIDBOOK_TEST_REQUIRED_XYZ123");
                assert!(location.contains("must be set"));
            }
            other => panic!("Expected EnvVarNotSet error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_substitution_escaped_dollar() {
        let (result, _) = substitute("price: $$100 and $plain");
        assert_eq!(result.unwrap(), "price: $100 and $plain");
    }

    #[test]
    fn test_env_substitution_missing_warning() {
        let (result, warnings) = substitute("value: ${SOLIDBOOK_TEST_WARN_XYZ123}");
        assert_eq!(result.unwrap(), "value: ");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("SOLIDBOOK_TEST_WARN_XYZ123"));
    }

    #[test]
    fn test_env_substitution_unclosed() {
        let (result, _) = substitute("value: ${OOPS");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let path = dir.path().join("solidbook.yaml");
        fs::write(
            &path,
            "\u{feff}title: My Book\ncontent_dir: content\nviewer:\n  theme: dracula\nserver:\n  bind: 127.0.0.1:5000\n",
        )
        .unwrap();

        let result = ConfigLoader::with_defaults().load(&path).unwrap();
        assert_eq!(result.config.title, "My Book");
        assert_eq!(result.config.viewer.theme, "dracula");
        assert_eq!(result.config.viewer.template, "react");
        assert_eq!(result.config.server.bind, "127.0.0.1:5000");
        assert_eq!(result.config.content_dir, Some(dir.path().join("content")));
        assert_eq!(result.source, Some(path));
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solidbook.yaml");
        fs::write(&path, "# nothing here\n").unwrap();

        let result = ConfigLoader::with_defaults().load(&path).unwrap();
        assert_eq!(*result.config, SiteConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::with_defaults()
            .load(Path::new("/definitely/not/solidbook.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_resolve_explicit_missing_file() {
        let err = ConfigLoader::with_defaults()
            .resolve(Some(Path::new("/definitely/not/solidbook.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_parse_error_has_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "title: ok\nviewer: [unclosed\n").unwrap();

        let err = ConfigLoader::with_defaults().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: Some(_), .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.yaml");
        fs::write(&path, "titel: oops\n").unwrap();

        let err = ConfigLoader::with_defaults().load(&path).unwrap_err();
        assert!(err.to_string().contains("titel"));
    }

    #[test]
    fn test_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.yaml");
        fs::write(&path, "title: ''\nserver:\n  bind: not-an-address\n").unwrap();

        match ConfigLoader::with_defaults().load(&path).unwrap_err() {
            ConfigError::ValidationError { errors, .. } => assert_eq!(errors.len(), 2),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.yaml");
        fs::write(&path, format!("description: {}\n", "x".repeat(200))).unwrap();

        let loader = ConfigLoader::new(LoaderOptions {
            max_config_size: 100,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(
            loader.load(&path).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solidbook.yaml");
        fs::write(&path, "out_dir: from-file\nserver:\n  bind: 127.0.0.1:1\n").unwrap();

        let loader = ConfigLoader::new(LoaderOptions {
            overrides: ConfigOverrides {
                content_dir: Some(dir.path().to_path_buf()),
                out_dir: Some(PathBuf::from("from-cli")),
                bind: Some("127.0.0.1:2".to_string()),
            },
            ..LoaderOptions::default()
        });
        let result = loader.load(&path).unwrap();
        assert_eq!(result.config.out_dir, PathBuf::from("from-cli"));
        assert_eq!(result.config.server.bind, "127.0.0.1:2");
        assert_eq!(result.config.content_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_env_or_parses_or_defaults() {
        assert_eq!(env_or("SOLIDBOOK_TEST_UNSET_LIMIT_XYZ", 7usize), 7);
    }
}
