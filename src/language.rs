//! Language and comment-family definitions
//!
//! Maps file extensions to languages, and languages to the comment family
//! used for stripping and the tag used for fenced code blocks.

use std::path::Path;

use strum::{Display, EnumIter, EnumProperty, IntoEnumIterator};

/// Comment syntax family shared by a group of languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Family {
    /// `//`, `/* */` and `///` doc lines, `"` strings
    Brace,
    /// Brace comments with `"`, `'` and backtick strings
    Script,
    /// `<!-- -->` block comments
    Markup,
    /// Structured data without native comments, `//` by quote parity
    Tagged,
    /// `#` line comments with triple-quoted multi-line strings
    Hash,
    /// Never stripped
    Documentation,
}

/// Languages recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumProperty, Display)]
pub enum Language {
    #[strum(props(extensions = ".sln", syntax = "text"))]
    Solution,

    #[strum(props(extensions = ".csproj", syntax = "xml"))]
    Project,

    #[strum(props(extensions = ".cs", syntax = "csharp"))]
    CSharp,

    #[strum(props(extensions = ".razor", syntax = "html"))]
    Razor,

    #[strum(props(extensions = ".js", syntax = "javascript"))]
    JavaScript,

    #[strum(props(extensions = ".jsx .jsxc", syntax = "jsx"))]
    Jsx,

    #[strum(props(extensions = ".ts", syntax = "typescript"))]
    TypeScript,

    #[strum(props(extensions = ".tsx", syntax = "tsx"))]
    Tsx,

    #[strum(props(extensions = ".json", syntax = "json"))]
    Json,

    #[strum(props(extensions = ".md", syntax = "markdown"))]
    Markdown,

    #[strum(props(extensions = ".py", syntax = "python"))]
    Python,
}

impl Language {
    /// Look up a language by extension (with leading dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::iter().find(|lang| lang.extensions().any(|e| e == ext))
    }

    /// Look up the language of a path
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(&extension_of(path))
    }

    /// Extensions handled by this language
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> {
        self.get_str("extensions").unwrap_or("").split_whitespace()
    }

    /// Fenced code block tag
    pub fn syntax(&self) -> &'static str {
        self.get_str("syntax").unwrap_or("text")
    }

    /// Comment family used when stripping
    pub fn family(&self) -> Family {
        match self {
            Self::CSharp | Self::Razor => Family::Brace,
            Self::JavaScript | Self::Jsx | Self::TypeScript | Self::Tsx => Family::Script,
            Self::Solution | Self::Project => Family::Markup,
            Self::Json => Family::Tagged,
            Self::Python => Family::Hash,
            Self::Markdown => Family::Documentation,
        }
    }
}

/// Lower-cased extension of a path including the leading dot, or "" if none
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Fenced code block tag for an extension, "text" when unknown
pub fn syntax_for(ext: &str) -> &'static str {
    Language::from_extension(ext)
        .map(|lang| lang.syntax())
        .unwrap_or("text")
}
