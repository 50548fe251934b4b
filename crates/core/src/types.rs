use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Version string the renderer always writes into `fc:frame`.
pub const FRAME_VERSION: &str = "vNext";

/// Clients render at most this many buttons; extra ordinals are dropped.
pub const MAX_BUTTONS: usize = 4;

/// What a client does when a button is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Sign the action and POST it to the frame's post URL.
    #[default]
    Post,
    /// Same as `Post`, but the server answers with a redirect.
    PostRedirect,
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::PostRedirect => "post_redirect",
        }
    }

    /// Only the exact `post_redirect` value selects a redirect; anything
    /// else, including an absent tag, means `post`.
    pub fn from_tag_content(content: Option<&str>) -> Self {
        match content {
            Some("post_redirect") => Self::PostRedirect,
            _ => Self::Post,
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    #[serde(default)]
    pub action: ButtonAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    pub fn post(label: impl Into<String>) -> Self {
        Self::new(label, ButtonAction::Post)
    }

    pub fn post_redirect(label: impl Into<String>) -> Self {
        Self::new(label, ButtonAction::PostRedirect)
    }
}

/// An interactive frame as described by a page's `fc:frame*` meta tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetadata {
    pub version: String,
    /// Should be smaller than 10MB with a 1.91:1 aspect ratio.
    pub image: String,
    /// Fallback image for clients that do not support frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Where clients POST the signed action packet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    /// Ordered by ordinal, at most [`MAX_BUTTONS`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    /// Seconds after which clients should expect the image to change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_period: Option<i64>,
}

impl FrameMetadata {
    pub fn new(version: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            image: image.into(),
            og_image: None,
            post_url: None,
            buttons: Vec::new(),
            refresh_period: None,
        }
    }

    /// The image non-frame clients should show.
    pub fn og_image_or_image(&self) -> &str {
        self.og_image.as_deref().unwrap_or(&self.image)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(Some("post_redirect"), ButtonAction::PostRedirect)]
    #[case(Some("post"), ButtonAction::Post)]
    #[case(Some("POST_REDIRECT"), ButtonAction::Post)]
    #[case(Some("link"), ButtonAction::Post)]
    #[case(None, ButtonAction::Post)]
    fn action_from_tag_content(#[case] content: Option<&str>, #[case] expected: ButtonAction) {
        assert_eq!(ButtonAction::from_tag_content(content), expected);
    }

    #[test]
    fn json_uses_camel_case_and_omits_empty_fields() {
        let mut frame = FrameMetadata::new("vNext", "https://img.example/a.png");
        frame.post_url = Some("https://example.com/api".into());
        frame.buttons.push(Button::post_redirect("Go"));

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "version": "vNext",
                "image": "https://img.example/a.png",
                "postUrl": "https://example.com/api",
                "buttons": [{ "label": "Go", "action": "post_redirect" }],
            })
        );
    }

    #[test]
    fn json_button_action_defaults_to_post() {
        let frame: FrameMetadata = serde_json::from_str(
            r#"{"version":"vNext","image":"i.png","buttons":[{"label":"A"}],"refreshPeriod":30}"#,
        )
        .unwrap();
        assert_eq!(frame.buttons, vec![Button::post("A")]);
        assert_eq!(frame.refresh_period, Some(30));
        assert!(frame.og_image.is_none());
    }

    #[test]
    fn og_image_falls_back_to_image() {
        let mut frame = FrameMetadata::new("vNext", "main.png");
        assert_eq!(frame.og_image_or_image(), "main.png");
        frame.og_image = Some("fallback.png".into());
        assert_eq!(frame.og_image_or_image(), "fallback.png");
    }
}
