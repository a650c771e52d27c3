use crate::entity::AnimalRecord;
use crate::store::{IntroGenerator, Introduction};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Build the generation prompt from an animal's attributes. Pure function
/// of the record.
fn build_prompt(animal: &AnimalRecord) -> String {
    let name = animal.name.as_deref().unwrap_or("this animal");
    format!(
        "Write a short, warm adoption introduction for the following rescue animal.\n\
         Name: {name}\n\
         Species: {}\n\
         Gender: {}\n\
         Spayed/Neutered: {}\n\
         Color: {}\n\
         Approximate age: {}\n\
         Location found: {}\n\
         Special characteristics: {}\n\
         Respond with 'Title: <a catchy title>' on the first line, then a blank line,\n\
         then the introduction body written from the animal's perspective.",
        animal.kind.as_deref().unwrap_or("unknown"),
        animal.gender.as_deref().unwrap_or("unknown"),
        animal.neuter.as_deref().unwrap_or("unknown"),
        animal.color.as_deref().unwrap_or("unknown"),
        animal.age.as_deref().unwrap_or("unknown"),
        animal.happen_place.as_deref().unwrap_or("unknown"),
        animal.special_mark.as_deref().unwrap_or("none noted"),
    )
}

/// Split a generated completion into title and body. The first line is the
/// title (with or without the requested `Title:` prefix); the remainder is
/// the body.
pub(crate) fn parse_introduction(text: &str) -> Result<Introduction> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::Generation("empty completion".to_string()));
    }

    let mut lines = trimmed.lines();
    let first = lines.next().unwrap_or_default();
    let title = first
        .strip_prefix("Title:")
        .unwrap_or(first)
        .trim()
        .to_string();
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    if title.is_empty() {
        return Err(Error::Generation("completion has no title line".to_string()));
    }
    let body = if body.is_empty() { title.clone() } else { body };
    Ok(Introduction { title, body })
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

/// Generation client for an OpenAI-compatible chat-completions endpoint.
pub struct HttpIntroGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpIntroGenerator {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl IntroGenerator for HttpIntroGenerator {
    async fn generate(&self, animal: &AnimalRecord) -> Result<Introduction> {
        let prompt = build_prompt(animal);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: 750,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Generation(format!(
                "generation endpoint returned {}",
                response.status()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::Generation("completion has no choices".to_string()))?;

        parse_introduction(content)
    }
}

/// Deterministic offline generator: a plain template over the animal's
/// attributes. Used when no generation endpoint is configured.
pub struct TemplateIntroGenerator;

#[async_trait]
impl IntroGenerator for TemplateIntroGenerator {
    async fn generate(&self, animal: &AnimalRecord) -> Result<Introduction> {
        let name = animal.name.as_deref().unwrap_or("A new friend");
        let kind = animal.kind.as_deref().unwrap_or("animal");
        let color = animal.color.as_deref().unwrap_or("lovely");

        Ok(Introduction {
            title: format!("{name} is looking for a home"),
            body: format!(
                "{name} is a {color} {kind} waiting for a family. \
                 Found near {}, {name} has shown a loving nature despite the circumstances.",
                animal.happen_place.as_deref().unwrap_or("the shelter"),
            ),
        })
    }
}
