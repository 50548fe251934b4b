//! Protobuf wire types for signed messages.
//!
//! Only the fields a frame server needs are declared; prost skips unknown
//! fields, so messages carrying other bodies still decode.

/// Seconds between the Unix epoch and the network epoch (2021-01-01 UTC).
pub const NETWORK_EPOCH_SECONDS: u64 = 1_609_459_200;

/// A signed message envelope.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Message {
    #[prost(message, optional, tag = "1")]
    pub data: Option<MessageData>,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
    #[prost(enumeration = "HashScheme", tag = "3")]
    pub hash_scheme: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub signature: Vec<u8>,
    #[prost(enumeration = "SignatureScheme", tag = "5")]
    pub signature_scheme: i32,
    #[prost(bytes = "vec", tag = "6")]
    pub signer: Vec<u8>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub data_bytes: Option<Vec<u8>>,
}

impl Message {
    pub fn message_type(&self) -> Option<MessageType> {
        self.data
            .as_ref()
            .and_then(|data| MessageType::try_from(data.r#type).ok())
    }

    pub fn is_frame_action(&self) -> bool {
        self.message_type() == Some(MessageType::FrameAction)
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MessageData {
    #[prost(enumeration = "MessageType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub fid: u64,
    /// Seconds since [`NETWORK_EPOCH_SECONDS`].
    #[prost(uint32, tag = "3")]
    pub timestamp: u32,
    #[prost(enumeration = "FarcasterNetwork", tag = "4")]
    pub network: i32,
    #[prost(oneof = "message_data::Body", tags = "16")]
    pub body: Option<message_data::Body>,
}

pub mod message_data {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "16")]
        FrameActionBody(super::FrameActionBody),
    }
}

/// A button press on a frame.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FrameActionBody {
    #[prost(bytes = "vec", tag = "1")]
    pub url: Vec<u8>,
    /// 1-based, matching the `fc:frame:button:<n>` ordinal.
    #[prost(uint32, tag = "2")]
    pub button_index: u32,
    #[prost(message, optional, tag = "3")]
    pub cast_id: Option<CastId>,
    #[prost(bytes = "vec", tag = "4")]
    pub input_text: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub state: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub transaction_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub address: Vec<u8>,
}

/// Identifies the cast a frame was embedded in.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CastId {
    #[prost(uint64, tag = "1")]
    pub fid: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MessageType {
    None = 0,
    CastAdd = 1,
    CastRemove = 2,
    ReactionAdd = 3,
    ReactionRemove = 4,
    LinkAdd = 5,
    LinkRemove = 6,
    VerificationAddEthAddress = 7,
    VerificationRemove = 8,
    UserDataAdd = 11,
    UsernameProof = 12,
    FrameAction = 13,
    LinkCompactState = 14,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FarcasterNetwork {
    None = 0,
    Mainnet = 1,
    Testnet = 2,
    Devnet = 3,
}

impl FarcasterNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum HashScheme {
    None = 0,
    Blake3 = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SignatureScheme {
    None = 0,
    Ed25519 = 1,
    Eip712 = 2,
}
