//! Helpers for reading a validated frame action.

use serde::Serialize;

use crate::proto::{
    CastId, FarcasterNetwork, FrameActionBody, Message, MessageData, NETWORK_EPOCH_SECONDS,
    message_data::Body,
};

/// The message data, if `message` is a frame action.
pub fn frame_action_data(message: &Message) -> Option<&MessageData> {
    message
        .data
        .as_ref()
        .filter(|_| message.is_frame_action())
}

/// The frame action body, if `message` is a frame action.
pub fn frame_action_body(message: &Message) -> Option<&FrameActionBody> {
    match frame_action_data(message)?.body.as_ref()? {
        Body::FrameActionBody(body) => Some(body),
    }
}

/// A cast id in the form clients exchange it: `fid` plus `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCastId {
    pub fid: u64,
    pub hash: String,
}

pub fn normalize_cast_id(cast_id: &CastId) -> NormalizedCastId {
    NormalizedCastId {
        fid: cast_id.fid,
        hash: format!("0x{}", hex::encode(&cast_id.hash)),
    }
}

/// Flat, serializable view of a frame action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    pub fid: u64,
    /// Unix seconds.
    pub timestamp: u64,
    pub network: &'static str,
    pub url: String,
    pub button_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<NormalizedCastId>,
    pub message_hash: String,
}

impl ActionSummary {
    /// `None` unless `message` is a frame action with a body.
    pub fn from_message(message: &Message) -> Option<Self> {
        let data = frame_action_data(message)?;
        let body = frame_action_body(message)?;

        let network = FarcasterNetwork::try_from(data.network)
            .map_or("unknown", |network| network.as_str());
        let input_text = (!body.input_text.is_empty())
            .then(|| String::from_utf8_lossy(&body.input_text).into_owned());

        Some(Self {
            fid: data.fid,
            timestamp: NETWORK_EPOCH_SECONDS + u64::from(data.timestamp),
            network,
            url: String::from_utf8_lossy(&body.url).into_owned(),
            button_index: body.button_index,
            input_text,
            cast_id: body.cast_id.as_ref().map(normalize_cast_id),
            message_hash: format!("0x{}", hex::encode(&message.hash)),
        })
    }
}
