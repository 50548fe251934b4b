use std::path::PathBuf;

use {
    anyhow::{Context, Result, bail},
    clap::Args,
    frames_config::FramesConfig,
    frames_core::{
        FrameFetcher, FrameMetadata, HtmlDocumentOptions, OpenGraphOptions,
        frame_to_html_document, frame_to_meta_tags, parse_frame,
    },
};

#[derive(Args)]
pub struct RenderArgs {
    /// Frame JSON file; stdin when omitted.
    pub file: Option<PathBuf>,
    /// Document `<title>`.
    #[arg(long)]
    pub title: Option<String>,
    /// `og:title` meta tag.
    #[arg(long)]
    pub og_title: Option<String>,
    /// Raw markup appended to `<head>`.
    #[arg(long)]
    pub head: Option<String>,
    /// Raw markup for `<body>`.
    #[arg(long)]
    pub body: Option<String>,
    /// Print only the meta tags, not a full document.
    #[arg(long)]
    pub tags_only: bool,
}

pub async fn handle_inspect(config: &FramesConfig, url: &str) -> Result<()> {
    let fetcher = FrameFetcher::from_config(&config.fetch)?;
    let Some(frame) = fetcher.fetch_frame(url).await? else {
        bail!("{url} does not describe a frame");
    };
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

pub fn handle_parse(html: &str, source_url: Option<&str>) -> Result<()> {
    let Some(frame) = parse_frame(html, source_url) else {
        bail!("no frame found in input");
    };
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

pub fn handle_render(frame_json: &str, args: &RenderArgs) -> Result<()> {
    print!("{}", render(frame_json, args)?);
    Ok(())
}

fn render(frame_json: &str, args: &RenderArgs) -> Result<String> {
    let frame: FrameMetadata =
        serde_json::from_str(frame_json).context("input is not frame JSON")?;

    if args.tags_only {
        return Ok(frame_to_meta_tags(&frame));
    }

    let options = HtmlDocumentOptions {
        title: args.title.clone(),
        og: args.og_title.clone().map(|title| OpenGraphOptions { title }),
        html_head: args.head.clone(),
        html_body: args.body.clone(),
    };
    Ok(frame_to_html_document(&frame, &options))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_JSON: &str = r#"{
        "version": "vNext",
        "image": "https://example.com/a.png",
        "postUrl": "https://example.com/api",
        "buttons": [{ "label": "Go", "action": "post_redirect" }]
    }"#;

    fn args() -> RenderArgs {
        RenderArgs {
            file: None,
            title: None,
            og_title: None,
            head: None,
            body: None,
            tags_only: false,
        }
    }

    #[test]
    fn tags_only_prints_meta_tags() {
        let out = render(FRAME_JSON, &RenderArgs {
            tags_only: true,
            ..args()
        })
        .unwrap();
        assert!(!out.contains("<html>"));
        assert!(out.contains(r#"<meta name="fc:frame:button:1:action" content="post_redirect">"#));
    }

    #[test]
    fn document_carries_options() {
        let out = render(FRAME_JSON, &RenderArgs {
            title: Some("Poll".into()),
            og_title: Some("Poll OG".into()),
            body: Some("<h1>Hi</h1>".into()),
            ..args()
        })
        .unwrap();
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>Poll</title>"));
        assert!(out.contains(r#"<meta property="og:title" content="Poll OG">"#));
        assert!(out.contains("<body><h1>Hi</h1></body>"));
    }

    #[test]
    fn rendered_document_parses_back() {
        let out = render(FRAME_JSON, &args()).unwrap();
        let frame = parse_frame(&out, None).unwrap();
        assert_eq!(frame.image, "https://example.com/a.png");
        assert_eq!(frame.buttons.len(), 1);
    }

    #[test]
    fn rejects_non_frame_json() {
        assert!(render(r#"{"image": 3}"#, &args()).is_err());
    }

    #[test]
    fn parse_without_frame_is_an_error() {
        assert!(handle_parse("<html><head></head></html>", None).is_err());
    }
}
