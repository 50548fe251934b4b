//! Extract [`FrameMetadata`] from an HTML document.

use std::sync::LazyLock;

use {
    regex::Regex,
    tracing::{debug, warn},
};

use crate::{
    html::{MetaTag, meta_tags},
    types::{Button, ButtonAction, FrameMetadata, MAX_BUTTONS},
};

pub(crate) const KEY_VERSION: &str = "fc:frame";
pub(crate) const KEY_IMAGE: &str = "fc:frame:image";
pub(crate) const KEY_POST_URL: &str = "fc:frame:post_url";
pub(crate) const KEY_REFRESH_PERIOD: &str = "fc:frame:refresh_period";
pub(crate) const KEY_OG_IMAGE: &str = "og:image";

/// `fc:frame:button:<ordinal>` with an optional `:action` suffix.
#[allow(clippy::expect_used)]
static BUTTON_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^fc:frame:button:([^:]*)(:action)?$").expect("button key pattern is valid")
});

/// Parse the frame described by `html`'s meta tags.
///
/// `source_url` is the address the document came from; it becomes the post
/// URL when the page does not declare one. Returns `None` when the page has
/// no `fc:frame` version or no `fc:frame:image`.
pub fn parse_frame(html: &str, source_url: Option<&str>) -> Option<FrameMetadata> {
    let tags = meta_tags(html);

    let version = lookup(&tags, KEY_VERSION)?;
    let image = lookup(&tags, KEY_IMAGE)?;

    let post_url = lookup(&tags, KEY_POST_URL)
        .or(source_url)
        .map(str::to_owned);

    let og_image = lookup(&tags, KEY_OG_IMAGE)
        .filter(|og| *og != image)
        .map(str::to_owned);

    let buttons = parse_buttons(&tags);
    let refresh_period = lookup(&tags, KEY_REFRESH_PERIOD).and_then(parse_refresh_period);

    debug!(
        version,
        buttons = buttons.len(),
        has_post_url = post_url.is_some(),
        "parsed frame"
    );

    Some(FrameMetadata {
        version: version.to_owned(),
        image: image.to_owned(),
        og_image,
        post_url,
        buttons,
        refresh_period,
    })
}

/// Content of the first tag keyed `key`; empty content counts as absent.
fn lookup<'a>(tags: &'a [MetaTag], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|tag| tag.has_key(key))
        .and_then(MetaTag::content)
        .filter(|content| !content.is_empty())
}

/// A button tag split into its ordinal and whether it carries the action.
struct ButtonTag<'a> {
    ordinal: i64,
    is_action: bool,
    content: Option<&'a str>,
}

fn button_tag(tag: &MetaTag) -> Option<ButtonTag<'_>> {
    let (key, captures) = tag
        .keys()
        .find_map(|key| BUTTON_KEY.captures(key).map(|c| (key, c)))?;

    let raw_ordinal = captures.get(1).map_or("", |m| m.as_str());
    let Ok(ordinal) = raw_ordinal.parse::<i64>() else {
        debug!(key, "skipping button tag with non-numeric ordinal");
        return None;
    };

    Some(ButtonTag {
        ordinal,
        is_action: captures.get(2).is_some(),
        content: tag.content(),
    })
}

fn parse_buttons(tags: &[MetaTag]) -> Vec<Button> {
    let (actions, labels): (Vec<ButtonTag<'_>>, Vec<ButtonTag<'_>>) =
        tags.iter().filter_map(button_tag).partition(|b| b.is_action);

    let mut buttons: Vec<(i64, Button)> = labels
        .iter()
        .map(|label| {
            let action = actions
                .iter()
                .find(|action| action.ordinal == label.ordinal)
                .and_then(|action| action.content);
            let button = Button::new(
                label.content.unwrap_or_default(),
                ButtonAction::from_tag_content(action),
            );
            (label.ordinal, button)
        })
        .collect();

    // Stable, so duplicate ordinals keep document order.
    buttons.sort_by_key(|(ordinal, _)| *ordinal);

    if buttons.len() > MAX_BUTTONS {
        debug!(
            found = buttons.len(),
            kept = MAX_BUTTONS,
            "dropping buttons beyond the limit"
        );
        buttons.truncate(MAX_BUTTONS);
    }

    buttons.into_iter().map(|(_, button)| button).collect()
}

fn parse_refresh_period(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(seconds) => Some(seconds),
        Err(e) => {
            warn!(value = raw, error = %e, "ignoring malformed refresh period");
            None
        },
    }
}
