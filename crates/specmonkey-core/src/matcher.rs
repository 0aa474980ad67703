//! URL matching inside comment text

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// A URL found in a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlMatch<'a> {
    pub url: &'a str,
}

/// Characters that always end a URL
fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '"' | '`')
}

/// Find every `http://` / `https://` URL in `text`, left to right.
pub fn find_urls(text: &str) -> UrlMatches<'_> {
    UrlMatches { text, pos: 0 }
}

/// Iterator returned by [`find_urls`]
pub struct UrlMatches<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for UrlMatches<'a> {
    type Item = UrlMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let (start, scheme_len) = SCHEMES
                .iter()
                .filter_map(|scheme| rest.find(scheme).map(|i| (i, scheme.len())))
                .min_by_key(|&(i, _)| i)?;

            let start = self.pos + start;
            let body_start = start + scheme_len;
            let raw_end = self.text[body_start..]
                .find(is_terminator)
                .map_or(self.text.len(), |i| body_start + i);
            self.pos = raw_end;

            let url = trim_trailing(&self.text[start..raw_end]);
            if url.len() > scheme_len {
                return Some(UrlMatch { url });
            }
        }
        None
    }
}

/// Drop trailing sentence punctuation and unbalanced closing brackets.
fn trim_trailing(url: &str) -> &str {
    let mut url = url;
    loop {
        let Some(last) = url.chars().next_back() else {
            return url;
        };
        let trim = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' => true,
            ')' => is_unbalanced(url, '(', ')'),
            ']' => is_unbalanced(url, '[', ']'),
            '}' => is_unbalanced(url, '{', '}'),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

fn is_unbalanced(url: &str, open: char, close: char) -> bool {
    let opens = url.chars().filter(|&c| c == open).count();
    let closes = url.chars().filter(|&c| c == close).count();
    closes > opens
}
