use async_trait::async_trait;

use super::ChatMessage;
use super::RefineIntent;

/// Failures from the hosted model. Every variant renders as text starting
/// with "Error" so it can be shown inline in place of a model reply.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Error: no API key is loaded")]
    MissingCredential,

    #[error("Error: the model API could not be reached: {0}")]
    Transport(String),

    #[error("Error: the model API rejected the API key ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Error: the model API quota is exhausted: {0}")]
    Quota(String),

    #[error("Error: the model API failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Error: the model returned an empty reply")]
    EmptyReply,

    #[error("Error: the image could not be prepared for upload: {0}")]
    Image(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> GatewayError {
        return GatewayError::Transport(err.to_string());
    }
}

#[async_trait]
pub trait Gateway {
    /// Lists every model id visible to the account behind the API key.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;

    /// Sends the image alongside the fixed item analysis instruction and
    /// returns the model's raw text.
    async fn describe_image(&self, image: &[u8], model: &str) -> Result<String, GatewayError>;

    /// Sends role tagged messages in order and returns the reply text.
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> Result<String, GatewayError>;
}

pub type GatewayBox = Box<dyn Gateway + Send + Sync>;

/// Why a chat call was issued, so its reply can be folded back into the
/// right part of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChatPurpose {
    Listing,
    RefinePost(RefineIntent),
    Conversation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayRequest {
    ListModels,
    DescribeImage {
        image: Vec<u8>,
        model: String,
    },
    Chat {
        purpose: ChatPurpose,
        messages: Vec<ChatMessage>,
        model: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayReply {
    Models(Result<Vec<String>, GatewayError>),
    Description(Result<String, GatewayError>),
    Chat(ChatPurpose, Result<String, GatewayError>),
}
