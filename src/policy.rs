/*!
 * File inclusion policy
 *
 * Decides, from a path alone, whether a discovered file belongs in the
 * digest. The decision depends only on the path and the immutable policy,
 * never on the file system or on earlier decisions.
 */

use std::collections::BTreeSet;
use std::path::{Component, Path};

use clap::ValueEnum;
use serde::Serialize;
use strum::Display;

use crate::language::extension_of;

/// Extension of the documentation family
const MARKDOWN_EXTENSION: &str = ".md";

/// File name kept in `readme` mode
const README_NAME: &str = "readme.md";

/// Extensions controlled by the JavaScript toggle
const SCRIPT_EXTENSIONS: [&str; 3] = [".js", ".jsx", ".jsxc"];

/// How Markdown files are selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MarkdownMode {
    /// Exclude all Markdown files
    None,
    /// Include only README.md files
    #[default]
    Readme,
    /// Include all Markdown files
    All,
}

impl MarkdownMode {
    /// Human readable description for the document header
    pub fn describe(&self) -> &'static str {
        match self {
            Self::None => "No Markdown files",
            Self::Readme => "README.md only",
            Self::All => "All Markdown files",
        }
    }
}

/// Fixed extension and exclusion sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// .NET solutions with JavaScript front ends; CSS and XML always excluded
    #[default]
    Dotnet,
    /// Adds Python and TypeScript sources, no forced exclusions
    Polyglot,
}

impl Profile {
    fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Dotnet => &[
                ".sln", ".csproj", ".cs", ".js", ".jsx", ".jsxc", ".razor", ".json", ".md",
            ],
            Self::Polyglot => &[
                ".sln", ".csproj", ".cs", ".js", ".py", ".razor", ".jsx", ".tsx", ".ts", ".json",
                ".md",
            ],
        }
    }

    fn excluded_dirs(&self) -> Vec<&'static str> {
        let mut dirs = vec![
            // Build output
            "bin",
            "obj",
            "dist",
            "build",
            "out",
            "target",
            // Dependencies
            "node_modules",
            "packages",
            "__pycache__",
            ".pytest_cache",
            // IDEs
            ".vs",
            ".vscode",
            ".idea",
            // Version control
            ".git",
            ".svn",
            ".hg",
            // Other
            ".azure",
            ".env",
            "logs",
        ];
        if *self == Self::Dotnet {
            dirs.extend([".github", "wwwroot"]);
        }
        dirs
    }

    fn forced_excluded_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Dotnet => &[".css", ".xml"],
            Self::Polyglot => &[],
        }
    }
}

/// Excluded file name fragments, matched as substrings of the lower-cased name
const EXCLUDED_NAME_PATTERNS: [&str; 7] = [
    ".min.js",
    ".min.css",
    "bundle.js",
    "bundle.css",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Immutable inclusion rules for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionPolicy {
    allowed_extensions: BTreeSet<String>,
    excluded_dirs: BTreeSet<String>,
    excluded_name_patterns: Vec<String>,
    forced_excluded_extensions: BTreeSet<String>,
    markdown_mode: MarkdownMode,
    include_js: bool,
}

impl InclusionPolicy {
    /// Build the policy for a profile
    pub fn new(profile: Profile, markdown_mode: MarkdownMode, include_js: bool) -> Self {
        Self {
            allowed_extensions: to_set(profile.allowed_extensions().iter().copied()),
            excluded_dirs: to_set(profile.excluded_dirs()),
            excluded_name_patterns: EXCLUDED_NAME_PATTERNS.iter().map(|p| p.to_string()).collect(),
            forced_excluded_extensions: to_set(profile.forced_excluded_extensions().iter().copied()),
            markdown_mode,
            include_js,
        }
    }

    /// Whether any segment of `path` is an excluded directory token
    ///
    /// Segments must match a token exactly; `binaries` is not `bin`.
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(segment) => self
                .excluded_dirs
                .contains(segment.to_string_lossy().as_ref()),
            _ => false,
        })
    }

    /// Decide whether a file belongs in the digest
    ///
    /// Pass paths relative to the scan root so that the root's own location
    /// never matches an exclusion.
    pub fn is_included(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase();
        let ext = extension_of(path);

        if self.is_excluded_dir(path)
            || self
                .excluded_name_patterns
                .iter()
                .any(|pattern| name.contains(pattern.as_str()))
        {
            return false;
        }

        if self.forced_excluded_extensions.contains(&ext) {
            return false;
        }

        if !self.allowed_extensions.contains(&ext) {
            return false;
        }

        if ext == MARKDOWN_EXTENSION {
            return match self.markdown_mode {
                MarkdownMode::None => false,
                MarkdownMode::Readme => name == README_NAME,
                MarkdownMode::All => true,
            };
        }

        if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
            return self.include_js;
        }

        true
    }
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self::new(Profile::default(), MarkdownMode::default(), true)
    }
}

/// Decide whether `path` is included under `policy`
pub fn is_included(path: &Path, policy: &InclusionPolicy) -> bool {
    policy.is_included(path)
}

fn to_set<'a>(items: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    items.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(mode: MarkdownMode) -> InclusionPolicy {
        InclusionPolicy::new(Profile::Dotnet, mode, true)
    }

    #[test]
    fn test_readme_selection() {
        let readme = Path::new("docs/README.md");
        assert!(policy(MarkdownMode::Readme).is_included(readme));
        assert!(policy(MarkdownMode::All).is_included(readme));
        assert!(!policy(MarkdownMode::None).is_included(readme));
    }

    #[test]
    fn test_changelog_selection() {
        let changelog = Path::new("CHANGELOG.md");
        assert!(!policy(MarkdownMode::Readme).is_included(changelog));
        assert!(!policy(MarkdownMode::None).is_included(changelog));
        assert!(policy(MarkdownMode::All).is_included(changelog));
    }

    #[test]
    fn test_readme_name_is_case_insensitive() {
        assert!(policy(MarkdownMode::Readme).is_included(Path::new("readme.MD")));
    }

    #[test]
    fn test_node_modules_always_excluded() {
        for mode in [MarkdownMode::None, MarkdownMode::Readme, MarkdownMode::All] {
            for include_js in [true, false] {
                for profile in [Profile::Dotnet, Profile::Polyglot] {
                    let policy = InclusionPolicy::new(profile, mode, include_js);
                    assert!(!policy.is_included(Path::new("web/node_modules/lib/index.js")));
                    assert!(!policy.is_included(Path::new("node_modules/README.md")));
                }
            }
        }
    }

    #[test]
    fn test_directory_match_is_exact_segment() {
        let policy = InclusionPolicy::default();
        assert!(!policy.is_included(Path::new("src/bin/Program.cs")));
        assert!(policy.is_included(Path::new("src/binaries/Program.cs")));
        assert!(policy.is_included(Path::new("src/robin/Program.cs")));
    }

    #[test]
    fn test_name_patterns_are_substrings() {
        let policy = InclusionPolicy::default();
        assert!(!policy.is_included(Path::new("app.bundle.js")));
        assert!(!policy.is_included(Path::new("lib/jquery.MIN.js")));
        assert!(!policy.is_included(Path::new("package-lock.json")));
        assert!(policy.is_included(Path::new("package.json")));
    }

    #[test]
    fn test_forced_exclusions_and_allow_list() {
        let policy = InclusionPolicy::default();
        assert!(!policy.is_included(Path::new("site.css")));
        assert!(!policy.is_included(Path::new("App.config.xml")));
        assert!(!policy.is_included(Path::new("main.py")));
        assert!(!policy.is_included(Path::new("index.ts")));
        assert!(!policy.is_included(Path::new("Makefile")));
        assert!(policy.is_included(Path::new("Program.CS")));
        assert!(policy.is_included(Path::new("App.sln")));
    }

    #[test]
    fn test_js_toggle() {
        let without = InclusionPolicy::new(Profile::Dotnet, MarkdownMode::Readme, false);
        assert!(!without.is_included(Path::new("src/app.js")));
        assert!(!without.is_included(Path::new("src/View.jsx")));
        assert!(!without.is_included(Path::new("src/View.jsxc")));
        assert!(without.is_included(Path::new("src/app.json")));
        assert!(InclusionPolicy::default().is_included(Path::new("src/app.js")));
    }

    #[test]
    fn test_polyglot_profile() {
        let policy = InclusionPolicy::new(Profile::Polyglot, MarkdownMode::Readme, true);
        assert!(policy.is_included(Path::new("tools/build.py")));
        assert!(policy.is_included(Path::new("web/index.tsx")));
        assert!(policy.is_included(Path::new(".github/scripts/run.js")));
        assert!(!policy.is_included(Path::new("site.css")));
        assert!(!InclusionPolicy::default().is_included(Path::new(".github/scripts/run.js")));
    }

    #[test]
    fn test_decisions_do_not_depend_on_order() {
        let policy = InclusionPolicy::default();
        let paths = ["a/Program.cs", "bin/x.cs", "README.md", "b/notes.md", "c.js"];
        let forward: Vec<bool> = paths.iter().map(|p| is_included(Path::new(p), &policy)).collect();
        let backward: Vec<bool> = paths
            .iter()
            .rev()
            .map(|p| is_included(Path::new(p), &policy))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![true, false, true, false, true]);
    }
}
