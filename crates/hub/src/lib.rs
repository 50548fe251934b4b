//! Signed frame actions: wire types, hub verification and helpers.
//!
//! A frame server receives a [`FrameActionPayload`] whose `messageBytes` is a
//! hex-encoded protobuf [`Message`]. [`FrameValidator`] decodes it, asks a
//! [`VerificationService`] (normally an [`HttpHubClient`]) whether the
//! signature is genuine, and reports a [`FrameValidation`].

pub mod action;
pub mod error;
pub mod hub;
pub mod payload;
pub mod proto;
pub mod validate;

pub use {
    action::{
        ActionSummary, NormalizedCastId, frame_action_body, frame_action_data, normalize_cast_id,
    },
    error::{Error, HubError, HubResult, Result},
    hub::{HttpHubClient, ValidationResponse, VerificationService},
    payload::{FrameActionPayload, TrustedData, UntrustedCastId, UntrustedData},
    proto::{CastId, FarcasterNetwork, FrameActionBody, Message, MessageData, MessageType},
    validate::{
        FrameValidation, FrameValidator, ValidateOptions, decode_message_bytes,
        validate_frame_action,
    },
};
