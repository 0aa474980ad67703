//! Comment grammars keyed by file extension
//!
//! Every language is a row of data: which markers open a line comment and
//! which pair of delimiters encloses a block comment. Adding a language means
//! adding a row to [`GRAMMARS`], nothing else.

use std::ffi::OsStr;
use std::path::Path;

/// Comment syntax for one family of file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    /// Markers that start a comment running to end of line, longest first
    pub line_markers: &'static [&'static str],
    /// Open/close delimiters of a block comment
    pub block: Option<(&'static str, &'static str)>,
    /// Whether markers must match with exact ASCII case
    pub case_sensitive: bool,
}

impl Grammar {
    /// Grammar for files we know nothing about: the whole file is code.
    pub const NONE: Grammar = Grammar {
        line_markers: &[],
        block: None,
        case_sensitive: true,
    };

    const C_LIKE: Grammar = Grammar {
        line_markers: &["//"],
        block: Some(("/*", "*/")),
        case_sensitive: true,
    };

    const BLOCK_ONLY_C: Grammar = Grammar {
        line_markers: &[],
        block: Some(("/*", "*/")),
        case_sensitive: true,
    };

    const PHP: Grammar = Grammar {
        line_markers: &["//", "#"],
        block: Some(("/*", "*/")),
        case_sensitive: true,
    };

    const MARKUP: Grammar = Grammar {
        line_markers: &[],
        block: Some(("<!--", "-->")),
        case_sensitive: true,
    };

    const HASH: Grammar = Grammar {
        line_markers: &["#"],
        block: None,
        case_sensitive: true,
    };

    const DASH: Grammar = Grammar {
        line_markers: &["--"],
        block: None,
        case_sensitive: true,
    };

    const LUA: Grammar = Grammar {
        line_markers: &["--"],
        block: Some(("--[[", "]]")),
        case_sensitive: true,
    };

    const HASKELL: Grammar = Grammar {
        line_markers: &["--"],
        block: Some(("{-", "-}")),
        case_sensitive: true,
    };

    const BATCH: Grammar = Grammar {
        line_markers: &["REM", "::"],
        block: None,
        case_sensitive: false,
    };

    /// Look up the grammar for a path by its extension.
    pub fn for_path(path: impl AsRef<Path>) -> &'static Grammar {
        path.as_ref()
            .extension()
            .and_then(OsStr::to_str)
            .map(lookup)
            .unwrap_or(&Grammar::NONE)
    }

    /// Whether this grammar recognizes any comment at all
    pub fn has_comments(&self) -> bool {
        !self.line_markers.is_empty() || self.block.is_some()
    }

    /// Length of the block-comment opener at `pos`, if one starts there
    pub(crate) fn block_open_at(&self, bytes: &[u8], pos: usize) -> Option<usize> {
        let (open, _) = self.block?;
        self.marker_at(bytes, pos, open).then_some(open.len())
    }

    /// Length of the block-comment closer at `pos`, if one starts there
    pub(crate) fn block_close_at(&self, bytes: &[u8], pos: usize) -> Option<usize> {
        let (_, close) = self.block?;
        self.marker_at(bytes, pos, close).then_some(close.len())
    }

    /// Length of the first line-comment marker that starts at `pos`
    pub(crate) fn line_marker_at(&self, bytes: &[u8], pos: usize) -> Option<usize> {
        self.line_markers
            .iter()
            .find(|marker| self.marker_at(bytes, pos, marker))
            .map(|marker| marker.len())
    }

    fn marker_at(&self, bytes: &[u8], pos: usize, marker: &str) -> bool {
        let Some(candidate) = bytes.get(pos..pos + marker.len()) else {
            return false;
        };
        let matched = if self.case_sensitive {
            candidate == marker.as_bytes()
        } else {
            candidate.eq_ignore_ascii_case(marker.as_bytes())
        };
        matched && Self::on_word_boundary(bytes, pos, marker)
    }

    /// Word-like markers (`REM`) only count as whole words, so `Premium`
    /// and `THEOREM=` stay code.
    fn on_word_boundary(bytes: &[u8], pos: usize, marker: &str) -> bool {
        let marker = marker.as_bytes();
        let is_word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_';

        let starts_word = marker.first().is_some_and(u8::is_ascii_alphabetic);
        if starts_word && pos > 0 && bytes.get(pos - 1).is_some_and(is_word) {
            return false;
        }
        let ends_word = marker.last().is_some_and(u8::is_ascii_alphabetic);
        if ends_word && bytes.get(pos + marker.len()).is_some_and(is_word) {
            return false;
        }
        true
    }
}

/// Extension table. Extensions are stored lowercase.
pub static GRAMMARS: &[(&[&str], Grammar)] = &[
    (
        &[
            "c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "inl", "m", "mm", "java", "kt",
            "kts", "scala", "groovy", "cs", "go", "swift", "dart", "idl", "webidl",
        ],
        Grammar::C_LIKE,
    ),
    (&["rs"], Grammar::C_LIKE),
    (
        &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"],
        Grammar::C_LIKE,
    ),
    (&["scss", "less"], Grammar::C_LIKE),
    (&["css"], Grammar::BLOCK_ONLY_C),
    (&["php"], Grammar::PHP),
    (
        &["html", "htm", "xhtml", "xml", "svg", "xul", "xsl", "vue"],
        Grammar::MARKUP,
    ),
    (
        &[
            "py", "rb", "sh", "bash", "zsh", "pl", "pm", "r", "toml", "yaml", "yml", "cmake",
            "mk", "ps1", "ex", "exs", "jl", "nix",
        ],
        Grammar::HASH,
    ),
    (&["sql", "ada", "adb", "ads"], Grammar::DASH),
    (&["lua"], Grammar::LUA),
    (&["hs", "elm"], Grammar::HASKELL),
    (&["bat", "cmd"], Grammar::BATCH),
];

/// Every extension the grammar table knows about, lowercase.
pub static SUPPORTED_EXTENSIONS: std::sync::LazyLock<Vec<&'static str>> =
    std::sync::LazyLock::new(|| {
        GRAMMARS
            .iter()
            .flat_map(|(exts, _)| exts.iter().copied())
            .collect()
    });

/// Look up the grammar for an extension (without the leading dot).
///
/// Matching ignores ASCII case; unknown extensions get [`Grammar::NONE`].
pub fn lookup(extension: &str) -> &'static Grammar {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    GRAMMARS
        .iter()
        .find(|(exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(extension)))
        .map(|(_, grammar)| grammar)
        .unwrap_or(&Grammar::NONE)
}

/// Check if a file extension has a comment grammar
pub fn is_supported_extension(ext: &OsStr) -> bool {
    ext.to_str().is_some_and(|e| lookup(e).has_comments())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_c_family() {
        for ext in ["c", "h", "cpp", "hpp", "cc"] {
            let grammar = lookup(ext);
            assert_eq!(grammar.line_markers, &["//"]);
            assert_eq!(grammar.block, Some(("/*", "*/")));
        }
    }

    #[test]
    fn test_lookup_rust_and_js() {
        assert_eq!(lookup("rs"), &Grammar::C_LIKE);
        assert_eq!(lookup("js"), &Grammar::C_LIKE);
        assert_eq!(lookup("tsx"), &Grammar::C_LIKE);
    }

    #[test]
    fn test_lookup_html_has_no_line_comments() {
        let grammar = lookup("html");
        assert!(grammar.line_markers.is_empty());
        assert_eq!(grammar.block, Some(("<!--", "-->")));
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(lookup("CPP"), lookup("cpp"));
        assert_eq!(lookup("Html"), lookup("html"));
        assert_eq!(lookup(".rs"), lookup("rs"));
    }

    #[test]
    fn test_unknown_extension_has_no_comments() {
        assert_eq!(lookup("md"), &Grammar::NONE);
        assert_eq!(lookup(""), &Grammar::NONE);
        assert!(!lookup("txt").has_comments());
    }

    #[test]
    fn test_for_path() {
        assert_eq!(Grammar::for_path("src/main.RS"), &Grammar::C_LIKE);
        assert_eq!(Grammar::for_path("docs/index.html"), &Grammar::MARKUP);
        assert_eq!(Grammar::for_path("Makefile"), &Grammar::NONE);
        assert_eq!(Grammar::for_path("archive.tar.gz"), &Grammar::NONE);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension(OsStr::new("rs")));
        assert!(is_supported_extension(OsStr::new("JS")));
        assert!(is_supported_extension(OsStr::new("html")));
        assert!(is_supported_extension(OsStr::new("py")));

        assert!(!is_supported_extension(OsStr::new("md")));
        assert!(!is_supported_extension(OsStr::new("json")));
        assert!(SUPPORTED_EXTENSIONS.contains(&"cpp"));
    }

    #[test]
    fn test_case_insensitive_markers() {
        let grammar = lookup("bat");
        assert_eq!(grammar.line_marker_at(b"rem hello", 0), Some(3));
        assert_eq!(grammar.line_marker_at(b"REM hello", 0), Some(3));
        assert_eq!(grammar.line_marker_at(b":: hello", 0), Some(2));
        assert_eq!(grammar.line_marker_at(b"echo", 0), None);
        assert_eq!(grammar.line_marker_at(b"@rem x", 1), Some(3));
        assert_eq!(grammar.line_marker_at(b"REM", 0), Some(3));

        assert_eq!(grammar.line_marker_at(b"Premium", 1), None);
        assert_eq!(grammar.line_marker_at(b"THEOREM=x", 4), None);
        assert_eq!(grammar.line_marker_at(b"REMARK", 0), None);

        let grammar = lookup("cpp");
        assert_eq!(grammar.block_open_at(b"x /* y", 2), Some(2));
        assert_eq!(grammar.block_close_at(b"*", 0), None);
    }
}
