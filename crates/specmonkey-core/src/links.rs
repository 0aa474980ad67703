//! Link records extracted from source comments

use crate::grammar::Grammar;
use crate::matcher::find_urls;
use crate::scanner::scan;
use crate::sources::Sources;
use eyre::Result;
use facet::Facet;

/// A URL found in a comment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Facet)]
pub struct Link {
    /// The URL as written in the comment
    pub url: String,
    /// Line the URL text is on (1-indexed)
    pub line_number: usize,
    /// File the URL was found in, exactly as the caller named it
    pub file_name: String,
}

impl Link {
    pub fn new(url: impl Into<String>, line_number: usize, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            line_number,
            file_name: file_name.into(),
        }
    }

    /// The URL fragment (text after the last `#`), if any
    pub fn fragment(&self) -> Option<&str> {
        self.url.rsplit_once('#').map(|(_, fragment)| fragment)
    }
}

/// Collection of links extracted from source files
#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
pub struct Links {
    pub links: Vec<Link>,
}

impl Links {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn into_vec(self) -> Vec<Link> {
        self.links
    }

    /// Extract links from any source
    pub fn extract(sources: impl Sources) -> Result<Links> {
        sources.extract()
    }

    /// Extract links from raw content (no I/O). The grammar comes from
    /// `file_name`'s extension.
    pub fn extract_from_content(file_name: &str, content: &str) -> Self {
        let mut links = Links::new();
        extract_from_content(file_name, content, &mut links.links);
        links
    }

    /// Merge another collection into this one
    pub fn extend(&mut self, other: Links) {
        self.links.extend(other.links);
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self { links }
    }
}

impl IntoIterator for Links {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Scan one file's content and push every URL found in its comments
pub(crate) fn extract_from_content(file_name: &str, content: &str, out: &mut Vec<Link>) {
    let grammar = Grammar::for_path(file_name);
    for span in scan(content, grammar) {
        for found in find_urls(span.text) {
            out.push(Link::new(found.url, span.line, file_name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpp_line_comment() {
        let content = "#include <vector>\n// https://example.com/cpp\nint main() {}\n";
        let links = Links::extract_from_content("src/file1.cpp", content);
        assert_eq!(
            links.into_vec(),
            vec![Link::new("https://example.com/cpp", 2, "src/file1.cpp")]
        );
    }

    #[test]
    fn test_url_in_code_is_ignored() {
        let content = r#"
            const char* kUrl = "https://in.code.example/";
            int f() { return 0; }
        "#;
        let links = Links::extract_from_content("a.cc", content);
        assert!(links.is_empty());
    }

    #[test]
    fn test_url_in_string_with_trailing_comment() {
        // The `//` inside the string starts the "comment": only text after it
        // is searched, so the code URL itself is cut off at its scheme.
        let content = r#"let u = "https://code.example/x"; // https://doc.example/y"#;
        let links = Links::extract_from_content("lib.rs", content);
        assert_eq!(links.len(), 1);
        assert_eq!(links.links[0].url, "https://doc.example/y");
    }

    #[test]
    fn test_block_comment_line_attribution() {
        let content = "<html>\n<!--\n  intro\n  https://bugzilla.mozilla.org/show_bug.cgi?id=1234#foo\n-->\n</html>";
        let links = Links::extract_from_content("page.html", content);
        assert_eq!(links.len(), 1);
        assert_eq!(links.links[0].line_number, 4);
        assert_eq!(
            links.links[0].url,
            "https://bugzilla.mozilla.org/show_bug.cgi?id=1234#foo"
        );
    }

    #[test]
    fn test_multiple_urls_same_line() {
        let content = "/* https://a.example/1 and https://b.example/2 */";
        let links = Links::extract_from_content("x.js", content);
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example/1", "https://b.example/2"]);
        assert!(links.iter().all(|l| l.line_number == 1));
    }

    #[test]
    fn test_same_url_twice_is_not_deduplicated() {
        let content = "// https://dup.example\n// https://dup.example\n";
        let links = Links::extract_from_content("d.rs", content);
        assert_eq!(links.len(), 2);
        assert_eq!(links.links[0].line_number, 1);
        assert_eq!(links.links[1].line_number, 2);
    }

    #[test]
    fn test_block_close_ends_url() {
        let content = "/*https://example.com/tight*/";
        let links = Links::extract_from_content("t.c", content);
        assert_eq!(links.links[0].url, "https://example.com/tight");
    }

    #[test]
    fn test_batch_words_containing_rem_are_code() {
        let content = "@echo off\n\
                       echo Premium https://code.example/not-a-comment\n\
                       set THEOREM=https://code.example/also-code\n";
        let links = Links::extract_from_content("build.bat", content);
        assert!(links.is_empty(), "got {:?}", links);
    }

    #[test]
    fn test_unknown_extension() {
        let links = Links::extract_from_content("notes.txt", "// https://example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_file_name_passed_through() {
        let content = "// https://example.com";
        let links = Links::extract_from_content("./a/../b//c.rs", content);
        assert_eq!(links.links[0].file_name, "./a/../b//c.rs");
    }

    #[test]
    fn test_fragment() {
        assert_eq!(
            Link::new("https://a.org/x#sec-2", 1, "f").fragment(),
            Some("sec-2")
        );
        assert_eq!(Link::new("https://a.org/x", 1, "f").fragment(), None);
    }
}
