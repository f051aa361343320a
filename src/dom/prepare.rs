//! Strict lexical pass that runs before `tl`.
//!
//! `tl` builds a tree quickly but is not an HTML tokenizer: it has no raw-text
//! elements, keeps a trailing `/` in tag names, ignores end tags that do not
//! match the innermost open element, and eats a `<` that starts nothing. This
//! pass reads the source the way a browser would and hands `tl` a canonical
//! stream instead:
//!
//! - every start tag as a bare `<name>`, its attributes kept aside in
//!   [`StartTag`] in source order,
//! - `script`, `style`, `textarea` and `title` bodies cut out as raw text,
//! - every end tag written out, including the ones HTML lets authors omit
//!   (`</li>`, `</p>`, `</td>`, ...),
//! - comments and stray doctypes dropped.
//!
//! Markup a browser would have to repair is rejected with
//! [`DomError::Parse`]: a bare `<`, an end tag with no open element, a
//! non-optional element left open, an unterminated tag or comment.

use super::{DomError, is_void_element};

/// Elements whose content is text up to the matching end tag.
const RAW_TEXT: [&str; 4] = ["script", "style", "textarea", "title"];

/// Start tags that close an open `<p>`.
const CLOSES_P: [&str; 33] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// One start tag, in the order it appears in the source.
#[derive(Debug, PartialEq)]
pub(super) struct StartTag {
    pub name: String,
    pub attrs: Vec<(String, Option<String>)>,
    /// Body of a raw-text element, exactly as written.
    pub raw_text: Option<String>,
}

#[derive(Debug)]
pub(super) struct Prepared {
    /// Canonical markup for `tl`: bare tags, every element closed.
    pub markup: String,
    pub tags: Vec<StartTag>,
}

pub(super) fn prepare(source: &str, origin: &str) -> Result<Prepared, DomError> {
    let mut lexer = Lexer {
        source,
        origin,
        pos: 0,
        markup: String::with_capacity(source.len()),
        tags: Vec::new(),
        open: Vec::new(),
    };
    lexer.run()?;
    Ok(Prepared {
        markup: lexer.markup,
        tags: lexer.tags,
    })
}

struct OpenElement {
    name: String,
    at: usize,
}

struct Lexer<'a> {
    source: &'a str,
    origin: &'a str,
    pos: usize,
    markup: String,
    tags: Vec<StartTag>,
    open: Vec<OpenElement>,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), DomError> {
        let source = self.source;
        while let Some(offset) = source[self.pos..].find('<') {
            let lt = self.pos + offset;
            self.markup.push_str(&source[self.pos..lt]);
            self.pos = lt;

            let rest = &source[lt..];
            if rest.starts_with("<!--") {
                self.comment()?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.declaration()?;
            } else if let Some(after) = rest.strip_prefix("</")
                && starts_with_letter(after)
            {
                self.end_tag()?;
            } else if starts_with_letter(&rest[1..]) {
                self.start_tag()?;
            } else {
                return Err(self.error(lt, "bare `<` in text (write `&lt;`)"));
            }
        }
        self.markup.push_str(&source[self.pos..]);
        self.pos = source.len();

        while let Some(open) = self.open.pop() {
            if !has_optional_end_tag(&open.name) {
                return Err(self.error(open.at, &format!("<{}> is never closed", open.name)));
            }
            push_end_tag(&mut self.markup, &open.name);
        }
        Ok(())
    }

    fn comment(&mut self) -> Result<(), DomError> {
        let start = self.pos;
        let end = self.source[start + 4..]
            .find("-->")
            .ok_or_else(|| self.error(start, "unterminated comment"))?;
        self.pos = start + 4 + end + 3;
        Ok(())
    }

    fn declaration(&mut self) -> Result<(), DomError> {
        let start = self.pos;
        let rest = &self.source[start..];
        let is_doctype = rest
            .get(..9)
            .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
        if !is_doctype {
            return Err(self.error(start, "unsupported markup declaration"));
        }
        let end = rest
            .find('>')
            .ok_or_else(|| self.error(start, "unterminated doctype"))?;
        self.pos = start + end + 1;
        Ok(())
    }

    fn start_tag(&mut self) -> Result<(), DomError> {
        let source = self.source;
        let lt = self.pos;
        let end = start_tag_end(source, lt).ok_or_else(|| self.error(lt, "unterminated start tag"))?;
        let raw = &source[lt..=end];
        let name = tag_name(&raw[1..]);
        if !is_valid_tag_name(&name) {
            return Err(self.error(lt, &format!("unsupported tag name `{name}`")));
        }
        let self_closing = raw[..raw.len() - 1].trim_end().ends_with('/');
        self.pos = end + 1;

        while self
            .open
            .last()
            .is_some_and(|open| implied_end(&open.name, &name))
        {
            if let Some(open) = self.open.pop() {
                push_end_tag(&mut self.markup, &open.name);
            }
        }

        let attrs = scan_start_tag_attributes(raw);
        self.markup.push('<');
        self.markup.push_str(&name);
        self.markup.push('>');

        if RAW_TEXT.contains(&name.as_str()) {
            let close = find_end_tag(source, self.pos, &name)
                .ok_or_else(|| self.error(lt, &format!("<{name}> is never closed")))?;
            let close_end = source[close..]
                .find('>')
                .map(|i| close + i)
                .ok_or_else(|| self.error(close, "unterminated end tag"))?;
            let text = source[self.pos..close].to_string();
            self.pos = close_end + 1;
            push_end_tag(&mut self.markup, &name);
            self.tags.push(StartTag {
                name,
                attrs,
                raw_text: Some(text),
            });
            return Ok(());
        }

        if self_closing && !is_void_element(&name) {
            push_end_tag(&mut self.markup, &name);
        } else if !is_void_element(&name) {
            self.open.push(OpenElement {
                name: name.clone(),
                at: lt,
            });
        }
        self.tags.push(StartTag {
            name,
            attrs,
            raw_text: None,
        });
        Ok(())
    }

    fn end_tag(&mut self) -> Result<(), DomError> {
        let source = self.source;
        let lt = self.pos;
        let end = source[lt..]
            .find('>')
            .map(|i| lt + i)
            .ok_or_else(|| self.error(lt, "unterminated end tag"))?;
        let name = tag_name(&source[lt + 2..end]);
        self.pos = end + 1;

        let Some(depth) = self.open.iter().rposition(|open| open.name == name) else {
            return Err(self.error(lt, &format!("</{name}> has no matching start tag")));
        };
        while self.open.len() > depth + 1 {
            if let Some(open) = self.open.pop() {
                if !has_optional_end_tag(&open.name) {
                    return Err(self.error(
                        open.at,
                        &format!("<{}> is not closed before </{name}>", open.name),
                    ));
                }
                push_end_tag(&mut self.markup, &open.name);
            }
        }
        self.open.pop();
        push_end_tag(&mut self.markup, &name);
        Ok(())
    }

    fn error(&self, at: usize, message: &str) -> DomError {
        let before = &self.source[..at];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        DomError::Parse {
            origin: self.origin.to_string(),
            message: format!("line {line}, column {column}: {message}"),
        }
    }
}

fn push_end_tag(markup: &mut String, name: &str) {
    markup.push_str("</");
    markup.push_str(name);
    markup.push('>');
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Lower-cased tag name at the start of `s` (after `<` or `</`).
fn tag_name(s: &str) -> String {
    s.chars()
        .take_while(|&c| !(c.is_whitespace() || c == '/' || c == '>'))
        .collect::<String>()
        .to_ascii_lowercase()
}

fn is_valid_tag_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// Whether a start tag for `next` closes the open element `open`.
fn implied_end(open: &str, next: &str) -> bool {
    match open {
        "p" => CLOSES_P.contains(&next),
        "li" => next == "li",
        "dt" | "dd" => matches!(next, "dt" | "dd"),
        "option" => matches!(next, "option" | "optgroup"),
        "optgroup" => next == "optgroup",
        "rt" | "rp" => matches!(next, "rt" | "rp"),
        "td" | "th" => matches!(next, "td" | "th" | "tr" | "thead" | "tbody" | "tfoot"),
        "tr" => matches!(next, "tr" | "thead" | "tbody" | "tfoot"),
        "thead" | "tbody" => matches!(next, "tbody" | "tfoot"),
        "colgroup" => matches!(next, "thead" | "tbody" | "tfoot" | "tr"),
        "head" => next == "body",
        _ => false,
    }
}

/// Elements whose end tag may be left out of the source.
fn has_optional_end_tag(name: &str) -> bool {
    matches!(
        name,
        "html"
            | "head"
            | "body"
            | "p"
            | "li"
            | "dt"
            | "dd"
            | "option"
            | "optgroup"
            | "rt"
            | "rp"
            | "tr"
            | "td"
            | "th"
            | "thead"
            | "tbody"
            | "tfoot"
            | "colgroup"
            | "caption"
    )
}

/// Index of the `>` closing the start tag at `lt`, skipping quoted values.
fn start_tag_end(source: &str, lt: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = lt + 1;
    let mut after_equals = false;
    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i),
            b'=' => after_equals = true,
            quote @ (b'"' | b'\'') if after_equals => {
                i += 1 + source[i + 1..].find(quote as char)?;
                after_equals = false;
            }
            b if b.is_ascii_whitespace() => {}
            _ => after_equals = false,
        }
        i += 1;
    }
    None
}

/// Start of the first `</name` (any case) at or after `from`.
fn find_end_tag(source: &str, from: usize, name: &str) -> Option<usize> {
    source[from..]
        .match_indices("</")
        .map(|(i, _)| from + i)
        .find(|&at| {
            let after = &source[at + 2..];
            after
                .get(..name.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
                && after[name.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_whitespace() || c == '/' || c == '>')
        })
}

/// Read the attributes of the start tag at the beginning of `raw`, in order.
///
/// Handles double-quoted, single-quoted, unquoted and valueless attributes.
/// Names are lower-cased; a repeated name keeps its first value.
fn scan_start_tag_attributes(raw: &str) -> Vec<(String, Option<String>)> {
    let mut chars = raw.strip_prefix('<').unwrap_or(raw).chars().peekable();

    // tag name
    while chars
        .peek()
        .is_some_and(|&c| !(c.is_whitespace() || c == '>' || c == '/'))
    {
        chars.next();
    }

    let mut attrs: Vec<(String, Option<String>)> = Vec::new();
    loop {
        while chars.peek().is_some_and(|&c| c.is_whitespace() || c == '/') {
            chars.next();
        }
        match chars.peek() {
            None | Some('>') => break,
            _ => {}
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                break;
            }
            name.push(c);
            chars.next();
        }
        if name.is_empty() {
            // stray '=' with no name
            chars.next();
            continue;
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let value = if chars.peek() == Some(&'=') {
            chars.next();
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            let mut value = String::new();
            match chars.peek().copied() {
                Some(quote @ ('"' | '\'')) => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                _ => {
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() || c == '>' {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                }
            }
            Some(value)
        } else {
            None
        };

        let name = name.to_ascii_lowercase();
        if !attrs.iter().any(|(existing, _)| *existing == name) {
            attrs.push((name, value));
        }
    }
    attrs
}
