//! Comment span scanner
//!
//! Walks a file's text with a three-state machine (code, line comment,
//! block comment) and yields the comment text one line at a time, so every
//! span knows exactly which line it sits on.
//!
//! The scanner only knows comment syntax. A `//` inside a string literal
//! starts a "comment" as far as it is concerned.

use crate::grammar::Grammar;

/// A run of comment text on a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan<'a> {
    /// Comment text, without the markers
    pub text: &'a str,
    /// Line number (1-indexed)
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
}

/// Lazy iterator over the comment spans of one file
pub struct CommentScanner<'a> {
    content: &'a str,
    grammar: &'a Grammar,
    pos: usize,
    line: usize,
    state: State,
}

impl<'a> CommentScanner<'a> {
    pub fn new(content: &'a str, grammar: &'a Grammar) -> Self {
        // Nothing to find; start at the end so the first `next` returns None.
        let pos = if grammar.has_comments() {
            0
        } else {
            content.len()
        };
        Self {
            content,
            grammar,
            pos,
            line: 1,
            state: State::Code,
        }
    }

    fn span(&self, start: usize, end: usize) -> CommentSpan<'a> {
        CommentSpan {
            text: &self.content[start..end],
            line: self.line,
        }
    }
}

impl<'a> Iterator for CommentScanner<'a> {
    type Item = CommentSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Every marker is ASCII, so positions where we slice are always
        // char boundaries even when stepping byte by byte through UTF-8.
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            match self.state {
                State::Code => {
                    if bytes[self.pos] == b'\n' {
                        self.line += 1;
                        self.pos += 1;
                    } else if let Some(len) = self.grammar.block_open_at(bytes, self.pos) {
                        self.pos += len;
                        self.state = State::BlockComment;
                    } else if let Some(len) = self.grammar.line_marker_at(bytes, self.pos) {
                        self.pos += len;
                        self.state = State::LineComment;
                    } else {
                        self.pos += 1;
                    }
                }
                State::LineComment => {
                    let start = self.pos;
                    // Leave the newline for `Code` so the line counter sees it
                    let end = bytes[start..]
                        .iter()
                        .position(|&b| b == b'\n')
                        .map_or(bytes.len(), |i| start + i);
                    self.pos = end;
                    self.state = State::Code;
                    if end > start {
                        return Some(self.span(start, end));
                    }
                }
                State::BlockComment => {
                    let start = self.pos;
                    let mut i = start;
                    while i < bytes.len() {
                        if bytes[i] == b'\n' {
                            break;
                        }
                        if self.grammar.block_close_at(bytes, i).is_some() {
                            break;
                        }
                        i += 1;
                    }

                    let span = (i > start).then(|| self.span(start, i));

                    if i >= bytes.len() {
                        // Unterminated block comment: the rest of the file counts
                        self.pos = bytes.len();
                    } else if bytes[i] == b'\n' {
                        self.pos = i + 1;
                        self.line += 1;
                    } else {
                        let close_len = self.grammar.block_close_at(bytes, i).unwrap_or(0);
                        self.pos = i + close_len;
                        self.state = State::Code;
                    }

                    if span.is_some() {
                        return span;
                    }
                }
            }
        }

        None
    }
}

/// Scan `content` for comments using `grammar`
pub fn scan<'a>(content: &'a str, grammar: &'a Grammar) -> CommentScanner<'a> {
    CommentScanner::new(content, grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lookup;

    fn spans<'a>(content: &'a str, ext: &str) -> Vec<(&'a str, usize)> {
        scan(content, lookup(ext))
            .map(|span| (span.text, span.line))
            .collect()
    }

    #[test]
    fn test_line_comments() {
        let content = "int x = 1;\n// first\nint y; // second\n";
        assert_eq!(spans(content, "cpp"), vec![(" first", 2), (" second", 3)]);
    }

    #[test]
    fn test_block_comment_split_per_line() {
        let content = "a /* one\ntwo\n  three */ b";
        assert_eq!(
            spans(content, "c"),
            vec![(" one", 1), ("two", 2), ("  three ", 3)]
        );
    }

    #[test]
    fn test_code_after_block_close_is_not_comment() {
        let content = "/* c */ code // d";
        assert_eq!(spans(content, "rs"), vec![(" c ", 1), (" d", 1)]);
    }

    #[test]
    fn test_line_comment_swallows_block_opener() {
        let content = "// see /* not a block\ncode\n";
        assert_eq!(spans(content, "js"), vec![(" see /* not a block", 1)]);
    }

    #[test]
    fn test_unterminated_block_runs_to_eof() {
        let content = "x\n/* open\nstill open";
        assert_eq!(spans(content, "rs"), vec![(" open", 2), ("still open", 3)]);
    }

    #[test]
    fn test_no_nested_blocks() {
        let content = "/* outer /* inner */ after */";
        assert_eq!(spans(content, "rs"), vec![(" outer /* inner ", 1)]);
    }

    #[test]
    fn test_html_comments() {
        let content = "<p>hi</p>\n<!-- note\n  more -->\n<!---->";
        assert_eq!(spans(content, "html"), vec![(" note", 2), ("  more ", 3)]);
    }

    #[test]
    fn test_html_has_no_line_comments() {
        let content = "<a href=\"//cdn.example.com\">x</a>";
        assert!(spans(content, "html").is_empty());
    }

    #[test]
    fn test_unknown_grammar_yields_nothing() {
        assert!(spans("// looks like a comment", "txt").is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(spans("", "rs").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "code\r\n// a\r\n// b\r\n";
        assert_eq!(spans(content, "rs"), vec![(" a\r", 2), (" b\r", 3)]);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let content = "let s = \"héllo\"; // café ☕\n";
        assert_eq!(spans(content, "rs"), vec![(" café ☕", 1)]);
    }

    #[test]
    fn test_lua_block_wins_over_line_marker() {
        let content = "--[[ block\nline two ]] x = 1 -- tail";
        assert_eq!(
            spans(content, "lua"),
            vec![(" block", 1), ("line two ", 2), (" tail", 2)]
        );
    }

    #[test]
    fn test_hash_comments() {
        let content = "#!/bin/sh\necho hi # trailing\n";
        assert_eq!(spans(content, "sh"), vec![("!/bin/sh", 1), (" trailing", 2)]);
    }

    #[test]
    fn test_batch_rem_needs_whole_word() {
        let content = "@echo off\n\
                       echo Premium https://code.example/not-a-comment\n\
                       set THEOREM=https://code.example/also-code\n\
                       REM https://doc.example/real\n\
                       :: https://doc.example/colons\n";
        assert_eq!(
            spans(content, "bat"),
            vec![(" https://doc.example/real", 4), (" https://doc.example/colons", 5)]
        );
    }
}
