//! Render [`FrameMetadata`] back into meta tags and HTML documents.

use std::fmt::Write as _;

use tracing::warn;

use crate::{
    html::escape_attr,
    parse::{KEY_IMAGE, KEY_OG_IMAGE, KEY_POST_URL, KEY_REFRESH_PERIOD, KEY_VERSION},
    types::{FRAME_VERSION, FrameMetadata, MAX_BUTTONS},
};

/// Open Graph fields for the document head.
#[derive(Debug, Clone, Default)]
pub struct OpenGraphOptions {
    pub title: String,
}

/// Extra content for [`frame_to_html_document`].
///
/// Every field is inserted verbatim. Callers must sanitize anything that
/// comes from untrusted input.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocumentOptions {
    pub title: Option<String>,
    pub og: Option<OpenGraphOptions>,
    /// Raw markup appended to `<head>` after the frame tags.
    pub html_head: Option<String>,
    /// Raw markup placed in `<body>`.
    pub html_body: Option<String>,
}

/// Meta tags describing `frame`, one per line.
///
/// The version is always written as [`FRAME_VERSION`] and buttons are
/// renumbered `1..=n` in slice order.
pub fn frame_to_meta_tags(frame: &FrameMetadata) -> String {
    let mut out = String::new();

    push_meta(&mut out, "property", KEY_OG_IMAGE, frame.og_image_or_image());
    push_meta(&mut out, "name", KEY_VERSION, FRAME_VERSION);
    push_meta(&mut out, "name", KEY_IMAGE, &frame.image);
    push_meta(
        &mut out,
        "name",
        KEY_POST_URL,
        frame.post_url.as_deref().unwrap_or_default(),
    );

    if frame.buttons.len() > MAX_BUTTONS {
        warn!(
            buttons = frame.buttons.len(),
            max = MAX_BUTTONS,
            "frame has too many buttons, extra buttons are not rendered"
        );
    }

    for (index, button) in frame.buttons.iter().take(MAX_BUTTONS).enumerate() {
        let ordinal = index + 1;
        push_meta(
            &mut out,
            "name",
            &format!("fc:frame:button:{ordinal}"),
            &button.label,
        );
        push_meta(
            &mut out,
            "name",
            &format!("fc:frame:button:{ordinal}:action"),
            button.action.as_str(),
        );
    }

    if let Some(period) = frame.refresh_period {
        push_meta(&mut out, "name", KEY_REFRESH_PERIOD, &period.to_string());
    }

    out
}

/// A complete HTML document carrying `frame`'s meta tags.
pub fn frame_to_html_document(frame: &FrameMetadata, options: &HtmlDocumentOptions) -> String {
    let mut head = String::new();
    if let Some(title) = &options.title {
        let _ = writeln!(head, "<title>{title}</title>");
    }
    if let Some(og) = &options.og {
        let _ = writeln!(head, r#"<meta property="og:title" content="{}">"#, og.title);
    }
    head.push_str(&frame_to_meta_tags(frame));
    if let Some(extra) = &options.html_head {
        head.push_str(extra);
        head.push('\n');
    }

    let body = options.html_body.as_deref().unwrap_or_default();

    format!("<!DOCTYPE html>\n<html>\n<head>\n{head}</head>\n<body>{body}</body>\n</html>\n")
}

fn push_meta(out: &mut String, attr: &str, key: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta {attr}="{key}" content="{}">"#,
        escape_attr(content)
    );
}
