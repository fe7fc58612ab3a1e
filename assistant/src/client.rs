//! Gemini REST client

use crate::{
    error::AssistantError,
    messages::{GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse},
    prompts,
    service::ContentGenerator,
    types::{ChatTurn, Content},
};
use eventease_core::{BoxFuture, Event};
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

/// Default API root
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default text model
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Default image model
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
    text_model: String,
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client with API key from environment
    ///
    /// Reads `GEMINI_API_KEY`, then `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::MissingApiKey` if neither variable is set
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AssistantError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Builder: Point the client at another API root
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: Set text model
    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Builder: Set image model
    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Generate text
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AssistantError> {
        self.post(&self.text_model, "generateContent", request).await
    }

    /// Generate images
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, AssistantError> {
        self.post(&self.image_model, "predict", request).await
    }

    async fn post<B, R>(&self, model: &str, method: &str, body: &B) -> Result<R, AssistantError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!(model, method, "Calling generative API");

        let response = self
            .client
            .post(format!("{}/models/{model}:{method}", self.api_url))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AssistantError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<R>()
                .await
                .map_err(|e| AssistantError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(AssistantError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AssistantError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AssistantError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl ContentGenerator for GeminiClient {
    fn describe_event<'a>(
        &'a self,
        title: &'a str,
        category: &'a str,
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(async move {
            let request =
                GenerateContentRequest::prompt(prompts::event_description(title, category));
            self.generate_content(&request).await?.text()
        })
    }

    fn generate_image<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(async move {
            let request = PredictRequest::image(prompts::event_poster(prompt));
            self.predict(&request).await?.data_url()
        })
    }

    fn answer_query<'a>(
        &'a self,
        question: &'a str,
        catalog: &'a [Event],
        history: &'a [ChatTurn],
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(async move {
            let today = chrono::Utc::now().date_naive();
            let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
            contents.push(Content::user(question));

            let request = GenerateContentRequest::new(contents)
                .with_system(prompts::chatbot_instruction(catalog, today))
                .without_thinking();
            self.generate_content(&request).await?.text()
        })
    }
}
