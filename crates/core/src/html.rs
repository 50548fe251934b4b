//! Lenient `<meta>` tag scanner.
//!
//! Walks the document once and collects every `<meta>` start tag in document
//! order. Comments, doctypes, end tags and raw-text element bodies (scripts,
//! styles, ...) are skipped so that markup-looking text inside them is never
//! mistaken for a tag. Malformed input never fails: an unterminated construct
//! simply ends the scan.

use std::borrow::Cow;

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "script", "style", "textarea", "title", "xmp",
];

/// Attributes of a single `<meta>` element.
///
/// Names are ASCII-lowercased, values have character references decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTag {
    attrs: Vec<(String, String)>,
}

impl MetaTag {
    /// First value of `name`; later duplicates are ignored like in browsers.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content(&self) -> Option<&str> {
        self.attr("content")
    }

    /// The identifying attributes, `name` before `property`.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        ["name", "property"]
            .into_iter()
            .filter_map(|attr| self.attr(attr))
    }

    /// True when either `name` or `property` equals `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }
}

/// Collect all `<meta>` tags of `html` in document order.
pub fn meta_tags(html: &str) -> Vec<MetaTag> {
    // ASCII lowercasing keeps byte offsets identical to `html`.
    let lower = html.to_ascii_lowercase();
    let bytes = html.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while let Some(offset) = html[i..].find('<') {
        i += offset;
        let rest = &lower[i..];

        if rest.starts_with("<!--") {
            match lower[i + 4..].find("-->") {
                Some(end) => i += 4 + end + 3,
                None => break,
            }
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") || rest.starts_with("</") {
            match html[i..].find('>') {
                Some(end) => i += end + 1,
                None => break,
            }
            continue;
        }

        let name_start = i + 1;
        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            // A stray `<` in text.
            i = name_start;
            continue;
        }

        let mut name_end = name_start;
        while name_end < bytes.len() && !is_tag_name_terminator(bytes[name_end]) {
            name_end += 1;
        }
        let tag_name = &lower[name_start..name_end];

        let (attrs, after) = parse_attributes(html, name_end);
        i = after;

        if tag_name == "meta" {
            tags.push(MetaTag { attrs });
        }

        if RAW_TEXT_ELEMENTS.iter().any(|raw| *raw == tag_name) {
            let closing = format!("</{tag_name}");
            match lower[i..].find(&closing) {
                Some(end) => i += end,
                None => break,
            }
        }

        if i >= html.len() {
            break;
        }
    }

    tags
}

fn is_tag_name_terminator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

/// Parse attributes starting right after the tag name. Returns the
/// attributes and the offset just past the closing `>` (or the end of input).
fn parse_attributes(html: &str, start: usize) -> (Vec<(String, String)>, usize) {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();
    let mut i = start;

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            return (attrs, len);
        }
        if bytes[i] == b'>' {
            return (attrs, i + 1);
        }

        let name_start = i;
        while i < len && !is_tag_name_terminator(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        if i == name_start {
            // Lone `=`.
            i += 1;
            continue;
        }
        let name = html[name_start..i].to_ascii_lowercase();

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            attrs.push((name, String::new()));
            continue;
        }

        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let raw = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = i + 1;
                match html[value_start..].find(quote as char) {
                    Some(end) => {
                        i = value_start + end + 1;
                        &html[value_start..value_start + end]
                    },
                    None => {
                        i = len;
                        &html[value_start..]
                    },
                }
            },
            _ => {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                &html[value_start..i]
            },
        };
        attrs.push((name, decode_entities(raw)));
    }
}

/// Longest reference body between `&` and `;` (`CounterClockwiseContourIntegral`).
const MAX_REFERENCE_LEN: usize = 32;

/// Decode character references in an attribute value.
///
/// Named references use the full HTML5 table. Unknown references are kept
/// verbatim.
pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= MAX_REFERENCE_LEN + 1)
            .and_then(|semi| decode_reference(&rest[..=semi]).map(|text| (text, semi)));

        match decoded {
            Some((text, semi)) => {
                out.push_str(&text);
                rest = &rest[semi + 1..];
            },
            None => {
                out.push('&');
                rest = &rest[1..];
            },
        }
    }

    out.push_str(rest);
    out
}

/// Decode one `&...;` reference, or `None` if it is not a known one.
fn decode_reference(reference: &str) -> Option<String> {
    let body = reference.strip_prefix('&')?.strip_suffix(';')?;

    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        return Some(ch.to_string());
    }

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    // Every named reference expands to one or two code points. Anything
    // longer means only a legacy prefix such as `&copy` matched.
    match html_escape::decode_html_entities(reference) {
        Cow::Owned(text) if text.chars().count() <= 2 => Some(text),
        _ => None,
    }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
