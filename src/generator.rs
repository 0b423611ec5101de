//! LLM-backed summary and quiz generation.

use crate::config::{GeneratorSettings, Prompts};
use crate::error::{Result, YtquizError};
use crate::openai::create_client_with_timeout;
use crate::quiz::GeneratorOutput;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Produces a summary and a multiple-choice quiz from a transcript.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Generate and parse a summary + quiz for the given transcript.
    async fn generate(&self, transcript: &str) -> Result<GeneratorOutput>;
}

/// Generator using the OpenAI chat completions API.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    question_count: u32,
    prompts: Prompts,
}

impl OpenAIGenerator {
    pub fn new(settings: &GeneratorSettings, prompts: Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(Duration::from_secs(settings.timeout_seconds))?,
            model: settings.model.clone(),
            temperature: settings.temperature,
            question_count: settings.question_count,
            prompts,
        })
    }

    /// Use a different model than the configured one.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Structured markdown summary (summary bullets, key quotes, key concepts).
    #[instrument(skip(self, transcript), fields(model = %self.model, chars = transcript.len()))]
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let user_prompt = self.prompts.render_with_custom(&self.prompts.summary.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| YtquizError::Generator(e.to_string()))?
                .into(),
        ];

        info!("Requesting summary");
        self.complete(messages).await
    }

    async fn complete(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| YtquizError::Generator(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            YtquizError::OpenAI(format!("Failed to generate response: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| YtquizError::Generator("Empty response from LLM".to_string()))
    }
}

#[async_trait]
impl QuizGenerator for OpenAIGenerator {
    #[instrument(skip(self, transcript), fields(model = %self.model, chars = transcript.len()))]
    async fn generate(&self, transcript: &str) -> Result<GeneratorOutput> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("question_count".to_string(), self.question_count.to_string());
        let user_prompt = self.prompts.render_with_custom(&self.prompts.quiz.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.quiz.system.clone())
                .build()
                .map_err(|e| YtquizError::Generator(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| YtquizError::Generator(e.to_string()))?
                .into(),
        ];

        info!("Requesting summary and quiz");
        let reply = self.complete(messages).await?;
        debug!("Generator replied with {} chars", reply.len());

        let output = GeneratorOutput::parse(&reply);
        if let GeneratorOutput::Raw(_) = output {
            warn!("Generator reply was not JSON; keeping it as raw text");
        }
        Ok(output)
    }
}
