//! Cover-letter generation.
//!
//! A [`TextGenerator`] is injected by the caller. [`HttpTextGenerator`] speaks the
//! OpenAI-compatible chat-completions protocol; with no generator, or when it fails,
//! [`cover_letter`] renders a deterministic template instead.

use crate::error::{BrowserError, Result};
use crate::form::answers::{non_empty, top_skills};
use crate::models::{Job, Profile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You write concise, specific cover letters for job applications. \
Reply with the letter body only, no subject line and no placeholders.";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BrowserError::TextGeneration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint: endpoint.into(), model: model.into(), api_key, temperature: 0.7 })
    }

    /// Build from `AUTO_APPLY_LLM_URL`, `AUTO_APPLY_LLM_MODEL`, and `AUTO_APPLY_LLM_API_KEY`
    /// (falling back to `OPENAI_API_KEY`). Returns `None` when neither an endpoint nor a key is set.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let endpoint = lookup("AUTO_APPLY_LLM_URL");
        let api_key = lookup("AUTO_APPLY_LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        if endpoint.is_none() && api_key.is_none() {
            return Ok(None);
        }

        let model = lookup("AUTO_APPLY_LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_LLM_URL.to_string());
        Self::new(endpoint, model, api_key).map(Some)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut request = self.client.post(&self.endpoint).json(&self.request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BrowserError::TextGeneration(format!("Request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrowserError::TextGeneration(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| BrowserError::TextGeneration(format!("Invalid response body: {}", e)))?;

        first_choice(parsed)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_choice(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| BrowserError::TextGeneration("Response contained no text".to_string()))
}

/// Prompt asking a generator for a cover letter tailored to `job`
pub fn cover_letter_prompt(profile: &Profile, job: &Job) -> String {
    let mut prompt = format!(
        "Write a cover letter of at most 200 words for {} applying to the {} position at {}.\n",
        profile.name, job.title, job.company
    );
    if let Some(skills) = top_skills(profile, 8) {
        prompt.push_str(&format!("Candidate skills: {}.\n", skills));
    }
    prompt.push_str(&format!("Years of experience: {}.\n", profile.experience_years));
    if let Some(experience) = non_empty(&profile.experience) {
        prompt.push_str(&format!("Experience summary: {}\n", experience));
    }
    if let Some(description) = non_empty(&job.description) {
        prompt.push_str(&format!("Job description: {}\n", description));
    }
    prompt
}

/// Deterministic cover letter used when no generator is available
pub fn cover_letter(profile: &Profile, job: &Job) -> String {
    let company = non_empty(&job.company).unwrap_or("your company");
    let title = non_empty(&job.title).unwrap_or("open");

    let background = match top_skills(profile, 3) {
        Some(skills) => format!(
            "With {} years of experience working with {}, I'm confident I can make an immediate contribution to your team.",
            profile.experience_years, skills
        ),
        None => format!(
            "With {} years of professional experience, I'm confident I can make an immediate contribution to your team.",
            profile.experience_years
        ),
    };

    format!(
        "Dear Hiring Manager,\n\n\
         I'm writing to apply for the {} position at {}. {}\n\n\
         I'd welcome the opportunity to discuss how my background fits what {} is building.\n\n\
         Best regards,\n{}",
        title, company, background, company, profile.name
    )
}

/// Ask `generator` for a cover letter, falling back to [`cover_letter`] on absence or failure
pub async fn generate_cover_letter(generator: Option<&dyn TextGenerator>, profile: &Profile, job: &Job) -> String {
    let Some(generator) = generator else {
        return cover_letter(profile, job);
    };

    match generator.generate(&cover_letter_prompt(profile, job)).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("Text generator returned an empty cover letter for '{}', using template", job.title);
            cover_letter(profile, job)
        }
        Err(e) => {
            log::warn!("Cover letter generation failed for '{}': {}; using template", job.title, e);
            cover_letter(profile, job)
        }
    }
}
