#![allow(clippy::unwrap_used, clippy::expect_used)]
use frames_core::{
    Button, FRAME_VERSION, FrameMetadata, HtmlDocumentOptions, OpenGraphOptions,
    frame_to_html_document, frame_to_meta_tags, parse_frame,
};

fn full_frame() -> FrameMetadata {
    FrameMetadata {
        version: FRAME_VERSION.into(),
        image: "https://img.example/poll.png?q=1&r=2".into(),
        og_image: Some("https://img.example/og.png".into()),
        post_url: Some("https://example.com/api/vote".into()),
        buttons: vec![
            Button::post("Yes"),
            Button::post("No"),
            Button::post_redirect("Results \"live\""),
            Button::post("Tom & Jerry's <pick>"),
        ],
        refresh_period: Some(30),
    }
}

#[test]
fn document_round_trips() {
    let frame = full_frame();
    let options = HtmlDocumentOptions {
        title: Some("Poll".into()),
        og: Some(OpenGraphOptions {
            title: "Vote now".into(),
        }),
        html_head: None,
        html_body: Some("<p>Open in a frame-aware client.</p>".into()),
    };
    let html = frame_to_html_document(&frame, &options);
    assert_eq!(parse_frame(&html, None), Some(frame));
}

#[test]
fn meta_tags_alone_round_trip() {
    let frame = FrameMetadata::new(FRAME_VERSION, "https://img.example/a.png");
    let tags = frame_to_meta_tags(&frame);
    assert_eq!(parse_frame(&tags, None), Some(frame));
}

#[test]
fn round_trip_normalizes_version() {
    let mut frame = full_frame();
    frame.version = "2023-12-01".into();

    let html = frame_to_html_document(&frame, &HtmlDocumentOptions::default());
    let parsed = parse_frame(&html, None).unwrap();

    assert_eq!(parsed.version, FRAME_VERSION);
    assert_eq!(parsed.buttons, frame.buttons);
}

#[test]
fn round_trip_without_post_url_uses_source_url() {
    let mut frame = full_frame();
    frame.post_url = None;

    let html = frame_to_html_document(&frame, &HtmlDocumentOptions::default());
    assert!(parse_frame(&html, None).unwrap().post_url.is_none());
    assert_eq!(
        parse_frame(&html, Some("https://example.com/frame"))
            .unwrap()
            .post_url
            .as_deref(),
        Some("https://example.com/frame")
    );
}

#[test]
fn sparse_ordinals_are_renumbered_by_a_round_trip() {
    let html = r#"<meta name="fc:frame" content="vNext">
        <meta name="fc:frame:image" content="a.png">
        <meta name="fc:frame:button:2" content="Second">
        <meta name="fc:frame:button:4" content="Fourth">
        <meta name="fc:frame:button:4:action" content="post_redirect">"#;

    let parsed = parse_frame(html, None).unwrap();
    let rendered = frame_to_meta_tags(&parsed);

    assert!(rendered.contains(r#"<meta name="fc:frame:button:1" content="Second">"#));
    assert!(rendered.contains(r#"<meta name="fc:frame:button:2" content="Fourth">"#));
    assert!(rendered.contains(r#"<meta name="fc:frame:button:2:action" content="post_redirect">"#));
    assert_eq!(parse_frame(&rendered, None), Some(parsed));
}

#[test]
fn json_round_trips() {
    let frame = full_frame();
    let json = serde_json::to_string(&frame).unwrap();
    let back: FrameMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn negative_refresh_period_round_trips() {
    let mut frame = FrameMetadata::new(FRAME_VERSION, "https://img.example/a.png");
    frame.refresh_period = Some(-5);

    let rendered = frame_to_meta_tags(&frame);

    assert!(rendered.contains(r#"<meta name="fc:frame:refresh_period" content="-5">"#));
    assert_eq!(parse_frame(&rendered, None).unwrap().refresh_period, Some(-5));
}

#[test]
fn named_references_in_labels_decode_and_round_trip() {
    let html = r#"<meta name="fc:frame" content="vNext">
        <meta name="fc:frame:image" content="a.png">
        <meta name="fc:frame:button:1" content="Caf&eacute; &copy; &hellip;">"#;

    let parsed = parse_frame(html, None).unwrap();
    assert_eq!(parsed.buttons, vec![Button::post("Café © …")]);

    let rendered = frame_to_meta_tags(&parsed);
    assert_eq!(parse_frame(&rendered, None), Some(parsed));
}
