//! Configuration for Toolhub
//!
//! Configuration lives in `~/.toolhub/config.json`. The file is optional;
//! missing fields fall back to their defaults. The package search path can
//! be overridden with the `TOOLHUB_PACKAGE_PATH` environment variable, which
//! uses the platform's path-list syntax (`:` on Unix, `;` on Windows).
//!
//! ```json
//! {
//!   "package_dirs": ["/opt/toolhub/packages", "~/.toolhub/packages"],
//!   "builtin_only": false
//! }
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HubError, Result};

/// Environment variable overriding [`Config::package_dirs`].
pub const PACKAGE_PATH_ENV: &str = "TOOLHUB_PACKAGE_PATH";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TOOLHUB_LOG";

const DEFAULT_PROGRAM_NAME: &str = "toolhub";

const ABOUT: &str = "The toolhub package provides a unified command-line interface for tools \
distributed as independently installed plug-in packages.";

/// Identity of the running program, as shown in usage and version output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    /// Name used in usage messages (`Type '<name> help' ...`).
    pub name: String,
    /// Program version.
    pub version: String,
    /// Text printed by `about` with no argument.
    pub about: String,
}

impl ProgramInfo {
    /// Program info for this build, named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            about: ABOUT.to_string(),
        }
    }

    /// Program info named after the invoked executable (`argv[0]`).
    ///
    /// Falls back to `toolhub` when the name cannot be determined.
    pub fn from_invocation(argv0: Option<&str>) -> Self {
        let name = argv0
            .and_then(|arg| Path::new(arg).file_stem())
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(DEFAULT_PROGRAM_NAME);
        Self::new(name)
    }

    /// Name of the package that hosts the builtin tools.
    pub fn package_name(&self) -> &'static str {
        env!("CARGO_PKG_NAME")
    }

    /// The `--version` line.
    pub fn version_line(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM_NAME)
    }
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories scanned for installed packages.
    pub package_dirs: Vec<PathBuf>,

    /// Load only the builtin tools, ignoring installed packages.
    pub builtin_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_dirs: vec![Self::dir().join("packages")],
            builtin_only: false,
        }
    }
}

impl Config {
    /// The Toolhub home directory (`~/.toolhub`).
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".toolhub")
    }

    /// Path of the configuration file.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load the configuration from the default location and apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path())?;
        if let Some(value) = std::env::var_os(PACKAGE_PATH_ENV) {
            config.apply_package_path(&value);
        }
        Ok(config)
    }

    /// Load the configuration file at `path`, or the defaults if it does not
    /// exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            HubError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Replace the package directories with the entries of a path list.
    ///
    /// Empty entries are ignored, so `TOOLHUB_PACKAGE_PATH=` disables
    /// installed packages entirely.
    pub fn apply_package_path(&mut self, value: &OsStr) {
        self.package_dirs = std::env::split_paths(value)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_program_info_from_invocation() {
        assert_eq!(
            ProgramInfo::from_invocation(Some("/usr/local/bin/sbt")).name,
            "sbt"
        );
        assert_eq!(ProgramInfo::from_invocation(None).name, "toolhub");
        assert_eq!(ProgramInfo::from_invocation(Some("")).name, "toolhub");
    }

    #[test]
    fn test_version_line() {
        let program = ProgramInfo::default();
        assert_eq!(
            program.version_line(),
            format!("toolhub {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.builtin_only);
    }

    #[test]
    fn test_partial_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "builtin_only": true }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.builtin_only);
        assert_eq!(config.package_dirs, Config::default().package_dirs);
    }

    #[test]
    fn test_malformed_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();

        assert!(matches!(Config::load_from(&path), Err(HubError::Json(_))));
    }

    #[test]
    fn test_package_path_override() {
        let mut config = Config::default();
        let value = std::env::join_paths(["/opt/a", "/opt/b"]).unwrap();
        config.apply_package_path(&value);
        assert_eq!(
            config.package_dirs,
            vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );

        config.apply_package_path(&OsString::new());
        assert!(config.package_dirs.is_empty());
    }
}
