//! Frame metadata: parse `fc:frame*` meta tags out of HTML and render them
//! back.
//!
//! The parser and renderer are pure functions. [`FrameFetcher`] adds the
//! one I/O path: fetch a page and parse it with its own URL as the fallback
//! post target.

pub mod error;
pub mod fetch;
pub mod html;
pub mod parse;
pub mod render;
pub mod types;

pub use {
    error::{Error, Result},
    fetch::FrameFetcher,
    parse::parse_frame,
    render::{HtmlDocumentOptions, OpenGraphOptions, frame_to_html_document, frame_to_meta_tags},
    types::{Button, ButtonAction, FRAME_VERSION, FrameMetadata, MAX_BUTTONS},
};
