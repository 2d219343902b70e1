//! Package environments for Toolhub
//!
//! A package environment answers three questions for discovery: which
//! packages are installed, whether a package can be activated, and which tool
//! factory an entry point resolves to. [`DirectoryEnvironment`] answers them
//! from `package.json` manifests found in package directories, plus the core
//! package that hosts the builtin tools.
//!
//! # Package Directory Structure
//!
//! ```text
//! ~/.toolhub/packages/
//! ├── Blank/
//! │   └── package.json
//! └── GeneTools/
//!     └── package.json
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ProgramInfo;
use crate::error::{HubError, Result};
use crate::tools::{FactoryTable, ToolFactory, BUILTIN_ENTRIES};

use super::types::{EntryPoint, Package, PackageManifest, PLUGIN_NAMESPACE};

/// Manifest file name inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

static PACKAGE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._\-]{0,127}$").unwrap());

static REQUIREMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._\-]*)\s*(.*?)\s*$").unwrap());

static CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(>=|<=|==|!=|>|<)\s*([A-Za-z0-9._\-+]+)\s*$").unwrap());

/// Why an entry point could not be resolved to a tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A required package is installed at a version that does not satisfy
    /// the requirement.
    #[error("version conflict: {0}")]
    VersionConflict(String),

    /// A required package is not installed.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// The entry's target does not name a linked-in tool.
    #[error("cannot import: {0}")]
    ImportFailure(String),
}

/// Source of installed packages and their plug-in entries.
#[cfg_attr(test, mockall::automock)]
pub trait PackageEnvironment {
    /// Name of the package hosting the core program. Tools from this package
    /// are builtin.
    fn core_package(&self) -> String;

    /// Every installed package, core package first.
    fn list_packages(&self) -> Vec<Package>;

    /// Add the packages installed under `location`, outside the regular
    /// search path, and return them. They are not listed by
    /// [`list_packages`](PackageEnvironment::list_packages) but satisfy the
    /// requirements of every package resolved afterwards.
    fn add_location(&mut self, location: &Path) -> Result<Vec<Package>>;

    /// Make a package's entries available. A package that fails activation
    /// is skipped as a whole.
    fn activate(&self, package: &Package) -> Result<()>;

    /// Resolve an entry point of `package` to the factory of its tool.
    fn resolve_entry(
        &self,
        package: &Package,
        entry: &EntryPoint,
    ) -> std::result::Result<ToolFactory, ResolveError>;
}

/// Comparison operator of a requirement clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Ge,
    Le,
    Eq,
    Ne,
    Gt,
    Lt,
}

impl Comparator {
    fn parse(op: &str) -> Option<Self> {
        match op {
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            _ => None,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Ge => ordering != Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
        }
    }
}

/// A parsed requirement specifier such as `toolhub>=0.5,<2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Required package name.
    pub name: String,
    /// Version clauses; all must hold. Empty means any version.
    pub clauses: Vec<(Comparator, String)>,
    raw: String,
}

impl Requirement {
    /// Parse a requirement specifier.
    pub fn parse(specifier: &str) -> Result<Self> {
        let invalid = || HubError::Config(format!("Invalid requirement '{}'", specifier));

        let caps = REQUIREMENT_RE.captures(specifier).ok_or_else(invalid)?;
        let name = caps[1].to_string();
        let rest = &caps[2];

        let mut clauses = Vec::new();
        if !rest.is_empty() {
            for clause in rest.split(',') {
                let caps = CLAUSE_RE.captures(clause).ok_or_else(invalid)?;
                let op = Comparator::parse(&caps[1]).ok_or_else(invalid)?;
                clauses.push((op, caps[2].to_string()));
            }
        }

        Ok(Self {
            name,
            clauses,
            raw: specifier.trim().to_string(),
        })
    }

    /// Whether `version` satisfies every clause.
    pub fn matches(&self, version: &str) -> bool {
        self.clauses
            .iter()
            .all(|(op, wanted)| op.accepts(compare_versions(version, wanted)))
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Numeric release components of a version string.
///
/// Each dot-separated component contributes its leading digits; parsing
/// stops at the first component without any (`0.5a1.dev` -> `[0, 5]`,
/// `0.5-r1` -> `[0, 5]`).
fn release_components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map_while(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .collect()
}

/// Compare two version strings by their numeric release components, padding
/// the shorter one with zeros.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = release_components(a);
    let b = release_components(b);
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Scan package directories.
///
/// Each directory in `dirs` is searched for subdirectories containing a
/// `package.json` manifest. Missing or unreadable directories are skipped,
/// and so are packages whose manifest cannot be loaded; none of them fails
/// the scan. Packages are returned sorted by directory path within each
/// search directory.
pub fn scan_packages(dirs: &[PathBuf]) -> Vec<Package> {
    let mut packages = Vec::new();

    for dir in dirs {
        if !dir.exists() {
            debug!(dir = %dir.display(), "Package directory does not exist, skipping");
            continue;
        }

        if !dir.is_dir() {
            warn!(path = %dir.display(), "Package path is not a directory, skipping");
            continue;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    dir = %dir.display(),
                    error = %e,
                    "Failed to read package directory, skipping"
                );
                continue;
            }
        };

        let mut package_dirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Failed to read directory entry, skipping");
                    continue;
                }
            };
            let entry_path = entry.path();
            if entry_path.is_dir() && entry_path.join(MANIFEST_FILE).exists() {
                package_dirs.push(entry_path);
            }
        }
        package_dirs.sort();

        for package_dir in package_dirs {
            match load_package(&package_dir) {
                Ok(package) => {
                    debug!(
                        package = %package.name(),
                        version = %package.version(),
                        "Found package"
                    );
                    packages.push(package);
                }
                Err(e) => {
                    warn!(
                        dir = %package_dir.display(),
                        error = %e,
                        "Failed to load package manifest, skipping"
                    );
                }
            }
        }
    }

    packages
}

/// Load a single package from its directory.
///
/// # Errors
/// - `HubError::Config` if `package.json` does not exist or cannot be read
/// - `HubError::Json` if the JSON is malformed
pub fn load_package(dir: &Path) -> Result<Package> {
    let manifest_path = dir.join(MANIFEST_FILE);

    if !manifest_path.exists() {
        return Err(HubError::Config(format!(
            "No {} found in {}",
            MANIFEST_FILE,
            dir.display()
        )));
    }

    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        HubError::Config(format!("Failed to read {}: {}", manifest_path.display(), e))
    })?;

    let manifest: PackageManifest = serde_json::from_str(&content)?;

    Ok(Package::new(manifest, dir.to_path_buf()))
}

/// The package hosting the core program and its builtin tools.
///
/// Its location is the directory of the running executable.
pub fn core_package(program: &ProgramInfo) -> Package {
    let entries: Vec<EntryPoint> = BUILTIN_ENTRIES
        .iter()
        .map(|(entry, target)| EntryPoint::new(*entry, *target))
        .collect();

    let manifest = PackageManifest {
        name: program.package_name().to_string(),
        version: program.version.clone(),
        description: Some(program.about.clone()),
        requires: Vec::new(),
        entry_points: [(PLUGIN_NAMESPACE.to_string(), entries)].into_iter().collect(),
    };

    let location = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    Package::new(manifest, location)
}

/// Package environment backed by package directories on disk.
///
/// Manifests are read once, when the environment is created or a location
/// is added.
#[derive(Debug)]
pub struct DirectoryEnvironment {
    packages: Vec<Package>,
    /// Packages from added locations; used for requirements only.
    supplementary: Vec<Package>,
    factories: FactoryTable,
}

impl DirectoryEnvironment {
    /// Scan `dirs` for packages. The core package of `program` is always
    /// listed first; packages on disk claiming its name are ignored.
    pub fn new(program: &ProgramInfo, dirs: &[PathBuf], factories: FactoryTable) -> Self {
        let core = core_package(program);
        let mut packages = vec![core];
        for package in scan_packages(dirs) {
            if package.name() == program.package_name() {
                warn!(
                    dir = %package.location.display(),
                    "Package shadows the core package, skipping"
                );
                continue;
            }
            packages.push(package);
        }

        info!(
            packages = packages.len(),
            dirs = dirs.len(),
            targets = factories.len(),
            "Package environment ready"
        );

        Self {
            packages,
            supplementary: Vec::new(),
            factories,
        }
    }

    /// Create an environment from packages already in memory. The first
    /// package is taken as the core package.
    pub fn from_packages(packages: Vec<Package>, factories: FactoryTable) -> Self {
        Self {
            packages,
            supplementary: Vec::new(),
            factories,
        }
    }

    fn find_installed(&self, name: &str) -> Option<&Package> {
        self.packages
            .iter()
            .chain(&self.supplementary)
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    fn check_requirement(&self, specifier: &str) -> std::result::Result<(), ResolveError> {
        let requirement = Requirement::parse(specifier)
            .map_err(|e| ResolveError::MissingDependency(e.to_string()))?;

        let installed = self.find_installed(&requirement.name).ok_or_else(|| {
            ResolveError::MissingDependency(format!(
                "The '{}' package was not found",
                requirement.name
            ))
        })?;

        if !requirement.matches(installed.version()) {
            return Err(ResolveError::VersionConflict(format!(
                "{} {} is installed but {} is required",
                installed.name(),
                installed.version(),
                requirement
            )));
        }

        Ok(())
    }
}

impl PackageEnvironment for DirectoryEnvironment {
    fn core_package(&self) -> String {
        self.packages
            .first()
            .map(|p| p.name().to_string())
            .unwrap_or_default()
    }

    fn list_packages(&self) -> Vec<Package> {
        self.packages.clone()
    }

    fn add_location(&mut self, location: &Path) -> Result<Vec<Package>> {
        if !location.is_dir() {
            return Err(HubError::Config(format!(
                "Package location {} is not a directory",
                location.display()
            )));
        }
        let packages = scan_packages(&[location.to_path_buf()]);
        self.supplementary.extend(packages.iter().cloned());
        Ok(packages)
    }

    fn activate(&self, package: &Package) -> Result<()> {
        let manifest = &package.manifest;
        if !PACKAGE_NAME_RE.is_match(&manifest.name) {
            return Err(HubError::Config(format!(
                "Invalid package name '{}' in {}",
                manifest.name,
                package.location.display()
            )));
        }
        if manifest.version.trim().is_empty() {
            return Err(HubError::Config(format!(
                "Package '{}' has an empty version string",
                manifest.name
            )));
        }
        for specifier in &manifest.requires {
            Requirement::parse(specifier)?;
        }
        Ok(())
    }

    fn resolve_entry(
        &self,
        package: &Package,
        entry: &EntryPoint,
    ) -> std::result::Result<ToolFactory, ResolveError> {
        for specifier in &package.manifest.requires {
            self.check_requirement(specifier)?;
        }

        self.factories.get(&entry.target).ok_or_else(|| {
            ResolveError::ImportFailure(format!(
                "no tool is linked in for target '{}'",
                entry.target
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::factory_table;
    use serde_json::json;
    use tempfile::TempDir;

    /// Helper to write a package directory with the given manifest.
    fn write_package(root: &Path, dir_name: &str, manifest: serde_json::Value) -> PathBuf {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();
        dir
    }

    fn blank_manifest(requires: &[&str]) -> serde_json::Value {
        json!({
            "name": "Blank",
            "version": "0.1",
            "requires": requires,
            "entry_points": {
                "toolhub.plugins": [
                    { "entry": "Blank blank bl", "target": "blank:Blank" }
                ]
            }
        })
    }

    fn environment(dirs: &[PathBuf]) -> DirectoryEnvironment {
        DirectoryEnvironment::new(&ProgramInfo::default(), dirs, factory_table())
    }

    // ---- versions and requirements ----

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("0.5", "0.5.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.5-r1", "0.5"), Ordering::Equal);
        assert_eq!(compare_versions("0.5a1.dev", "0.5"), Ordering::Equal);
        assert_eq!(compare_versions("0.10", "0.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "10.0"), Ordering::Less);
    }

    #[test]
    fn test_requirement_parse() {
        let req = Requirement::parse("toolhub>=0.5").unwrap();
        assert_eq!(req.name, "toolhub");
        assert_eq!(req.clauses, vec![(Comparator::Ge, "0.5".to_string())]);

        let req = Requirement::parse("blarg").unwrap();
        assert_eq!(req.name, "blarg");
        assert!(req.clauses.is_empty());
        assert!(req.matches("anything"));

        let req = Requirement::parse("toolhub >= 0.4, < 1.0").unwrap();
        assert_eq!(req.clauses.len(), 2);
        assert!(req.matches("0.5.0"));
        assert!(!req.matches("1.0"));
        assert!(!req.matches("0.3"));
    }

    #[test]
    fn test_requirement_parse_invalid() {
        assert!(Requirement::parse("").is_err());
        assert!(Requirement::parse("toolhub=>1").is_err());
        assert!(Requirement::parse("toolhub>=").is_err());
    }

    #[test]
    fn test_requirement_display() {
        assert_eq!(
            Requirement::parse(" toolhub>=10.0 ").unwrap().to_string(),
            "toolhub>=10.0"
        );
    }

    // ---- scanning ----

    #[test]
    fn test_scan_packages_finds_manifests() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Blank", blank_manifest(&[]));
        write_package(
            tmp.path(),
            "Other",
            json!({ "name": "Other", "version": "2.0" }),
        );
        fs::create_dir(tmp.path().join("no-manifest")).unwrap();
        fs::write(tmp.path().join("stray.txt"), "hello").unwrap();

        let packages = scan_packages(&[tmp.path().to_path_buf()]);
        let names: Vec<&str> = packages.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Blank", "Other"]);
    }

    #[test]
    fn test_scan_packages_skips_malformed_manifest() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Blank", blank_manifest(&[]));
        let broken = tmp.path().join("Broken");
        fs::create_dir(&broken).unwrap();
        fs::write(broken.join(MANIFEST_FILE), "{ broken json").unwrap();

        let packages = scan_packages(&[tmp.path().to_path_buf()]);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name(), "Blank");
    }

    #[test]
    fn test_scan_packages_nonexistent_directory() {
        let packages = scan_packages(&[PathBuf::from("/nonexistent/path/packages")]);
        assert!(packages.is_empty());
    }

    #[test]
    fn test_load_package_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let result = load_package(tmp.path());
        assert!(matches!(result, Err(HubError::Config(_))));
    }

    // ---- environment ----

    #[test]
    fn test_core_package_lists_builtins() {
        let core = core_package(&ProgramInfo::default());
        assert_eq!(core.name(), env!("CARGO_PKG_NAME"));
        let entries: Vec<&str> = core
            .entry_map(PLUGIN_NAMESPACE)
            .iter()
            .map(|e| e.entry.as_str())
            .collect();
        assert_eq!(entries, vec!["About about", "File file", "Help help h ?"]);
    }

    #[test]
    fn test_environment_lists_core_first() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Blank", blank_manifest(&[]));

        let env = environment(&[tmp.path().to_path_buf()]);
        let packages = env.list_packages();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name(), env.core_package());
        assert_eq!(packages[1].name(), "Blank");
    }

    #[test]
    fn test_environment_ignores_core_shadow() {
        let tmp = TempDir::new().unwrap();
        write_package(
            tmp.path(),
            "Impostor",
            json!({ "name": env!("CARGO_PKG_NAME"), "version": "99.0" }),
        );

        let env = environment(&[tmp.path().to_path_buf()]);
        assert_eq!(env.list_packages().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_packages_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        write_package(&locked, "Hidden", blank_manifest(&[]));
        let open = tmp.path().join("open");
        write_package(&open, "Blank", blank_manifest(&[]));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let unreadable = fs::read_dir(&locked).is_err();

        let packages = scan_packages(&[locked.clone(), open]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let names: Vec<&str> = packages.iter().map(|p| p.name()).collect();
        if unreadable {
            assert_eq!(names, vec!["Blank"]);
        } else {
            // Permission bits do not apply to privileged users.
            assert_eq!(names, vec!["Hidden", "Blank"]);
        }
    }

    #[test]
    fn test_add_location_is_not_listed() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Blank", blank_manifest(&[]));

        let mut env = environment(&[]);
        let packages = env.add_location(tmp.path()).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name(), "Blank");
        assert_eq!(env.list_packages().len(), 1);
    }

    #[test]
    fn test_add_location_rejects_missing_directory() {
        let mut env = environment(&[]);
        assert!(matches!(
            env.add_location(Path::new("/nonexistent/extra")),
            Err(HubError::Config(_))
        ));
    }

    #[test]
    fn test_added_location_satisfies_requirements() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Needy", json!({ "name": "Needy", "version": "1.0", "requires": ["Helper>=2"] }));
        write_package(tmp.path(), "Helper", json!({ "name": "Helper", "version": "2.3" }));

        let mut env = environment(&[]);
        let packages = env.add_location(tmp.path()).unwrap();
        let needy = packages.iter().find(|p| p.name() == "Needy").unwrap();
        let entry = EntryPoint::new("Needy needy", "blank:Blank");

        assert!(env.resolve_entry(needy, &entry).is_ok());
        assert!(matches!(
            environment(&[]).resolve_entry(needy, &entry),
            Err(ResolveError::MissingDependency(_))
        ));
    }

    #[test]
    fn test_activate_rejects_bad_manifests() {
        let env = environment(&[]);
        let package = |manifest: serde_json::Value| {
            Package::new(serde_json::from_value(manifest).unwrap(), PathBuf::from("/tmp/x"))
        };

        assert!(env.activate(&package(blank_manifest(&["toolhub>=0.1"]))).is_ok());
        assert!(env
            .activate(&package(json!({ "name": "", "version": "1.0" })))
            .is_err());
        assert!(env
            .activate(&package(json!({ "name": "Blank", "version": "  " })))
            .is_err());
        assert!(env
            .activate(&package(json!({ "name": "Blank", "version": "1.0", "requires": ["toolhub=>1"] })))
            .is_err());
    }

    #[test]
    fn test_resolve_entry_outcomes() {
        let env = environment(&[]);
        let entry = EntryPoint::new("Blank blank bl", "blank:Blank");
        let package = |requires: &[&str]| {
            Package::new(
                serde_json::from_value(blank_manifest(requires)).unwrap(),
                PathBuf::from("/tmp/Blank"),
            )
        };

        assert!(env.resolve_entry(&package(&["toolhub>=0.1"]), &entry).is_ok());

        assert!(matches!(
            env.resolve_entry(&package(&["toolhub>=10.0"]), &entry),
            Err(ResolveError::VersionConflict(_))
        ));
        assert!(matches!(
            env.resolve_entry(&package(&["blarg"]), &entry),
            Err(ResolveError::MissingDependency(_))
        ));

        let bad_target = EntryPoint::new("Bad bad-entry", "bad:ABadTarget");
        assert!(matches!(
            env.resolve_entry(&package(&[]), &bad_target),
            Err(ResolveError::ImportFailure(_))
        ));
    }

    #[test]
    fn test_requirements_checked_before_target() {
        let env = environment(&[]);
        let bad_target = EntryPoint::new("Bad bad-entry", "bad:ABadTarget");
        let package = Package::new(
            serde_json::from_value(blank_manifest(&["blarg"])).unwrap(),
            PathBuf::from("/tmp/Blank"),
        );
        assert!(matches!(
            env.resolve_entry(&package, &bad_target),
            Err(ResolveError::MissingDependency(_))
        ));
    }

    #[test]
    fn test_in_memory_environment() {
        let manifest = |value: serde_json::Value| -> PackageManifest {
            serde_json::from_value(value).unwrap()
        };
        let core = Package::new(
            manifest(json!({ "name": "core", "version": "2.1" })),
            PathBuf::from("/usr/lib/core"),
        );
        let plugin = Package::new(
            manifest(blank_manifest(&["core>=2,<3"])),
            PathBuf::from("/opt/Blank"),
        );
        let env = DirectoryEnvironment::from_packages(vec![core, plugin.clone()], factory_table());

        assert_eq!(env.core_package(), "core");
        assert_eq!(env.list_packages().len(), 2);
        let entry = &plugin.entry_map(PLUGIN_NAMESPACE)[0];
        assert!(env.resolve_entry(&plugin, entry).is_ok());
    }

    #[test]
    fn test_requirement_name_is_case_insensitive() {
        let env = environment(&[]);
        let entry = EntryPoint::new("Blank blank", "blank:Blank");
        let package = Package::new(
            serde_json::from_value(blank_manifest(&["TOOLHUB"])).unwrap(),
            PathBuf::from("/tmp/Blank"),
        );
        assert!(env.resolve_entry(&package, &entry).is_ok());
    }
}
