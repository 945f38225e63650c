#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;

use async_trait::async_trait;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::ChatMessage;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayError;
use crate::domain::services::item_parser::ITEM_ANALYSIS_PROMPT;

const JPEG_QUALITY: u8 = 90;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Model {
    id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    data: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

/// Re-encodes any supported upload as a JPEG data URL.
fn jpeg_data_url(image: &[u8]) -> Result<String, GatewayError> {
    let decoded =
        image::load_from_memory(image).map_err(|err| return GatewayError::Image(err.to_string()))?;
    let rgb = decoded.to_rgb8();

    let mut bytes: Vec<u8> = vec![];
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|err| return GatewayError::Image(err.to_string()))?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    return Ok(format!("data:image/jpeg;base64,{encoded}"));
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| return e.error.message)
        .unwrap_or(body);

    tracing::error!(status = status.as_u16(), message = message.as_str(), "Groq request failed");

    match status.as_u16() {
        401 | 403 => {
            return Err(GatewayError::Auth {
                status: status.as_u16(),
                message,
            });
        }
        429 => return Err(GatewayError::Quota(message)),
        _ => {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }
    }
}

/// Groq's OpenAI compatible API, used without streaming.
pub struct Groq {
    url: String,
    token: String,
}

impl Groq {
    pub fn new(url: &str, token: &str) -> Groq {
        return Groq {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        };
    }

    fn ensure_token(&self) -> Result<(), GatewayError> {
        if self.token.is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        return Ok(());
    }

    async fn complete(&self, req: CompletionRequest) -> Result<String, GatewayError> {
        self.ensure_token()?;
        tracing::debug!(model = req.model.as_str(), messages = req.messages.len(), "completion request");

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        let res = check_status(res).await?.json::<CompletionResponse>().await?;
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|e| return e.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GatewayError::EmptyReply);
        }

        return Ok(content);
    }
}

#[async_trait]
impl Gateway for Groq {
    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        self.ensure_token()?;

        let res = reqwest::Client::new()
            .get(format!("{url}/v1/models", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        let res = check_status(res).await?.json::<ModelListResponse>().await?;
        let mut models: Vec<String> = res
            .data
            .iter()
            .map(|model| {
                return model.id.to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn describe_image(&self, image: &[u8], model: &str) -> Result<String, GatewayError> {
        self.ensure_token()?;
        let url = jpeg_data_url(image)?;

        let req = CompletionRequest {
            model: model.to_string(),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: ITEM_ANALYSIS_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url },
                    },
                ]),
            }],
            stream: false,
        };

        return self.complete(req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> Result<String, GatewayError> {
        let req = CompletionRequest {
            model: model.to_string(),
            messages: messages
                .iter()
                .map(|msg| {
                    return MessageRequest {
                        role: msg.role.to_string(),
                        content: MessageContent::Text(msg.content.to_string()),
                    };
                })
                .collect(),
            stream: false,
        };

        return self.complete(req).await;
    }
}
