use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{GenerationClient, GenerationRequest, GenerationResponse, TestCase};

/// Modelo usado cuando GROQ_MODEL no está definido
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Base de la API cuando GROQ_API_URL no está definida
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

const SYSTEM_PROMPT: &str = "Eres un analista QA experto en diseño de casos de prueba. A partir de la historia de usuario en JSON que recibirás, genera casos de prueba que cubran los criterios de aceptación, incluyendo escenarios negativos y de borde. Responde únicamente con un objeto JSON, sin explicaciones ni bloques de código, con esta forma: {\"cases\":[{\"id\":\"TC-01\",\"title\":\"...\",\"category\":\"positive\",\"expectedResult\":\"...\",\"testData\":\"...\",\"steps\":[\"...\"]}]}. Las categorías válidas son positive, negative, edge, authorization y non-functional. Cada caso debe tener al menos tres pasos concretos y un expectedResult verificable. Usa null en testData cuando el caso no necesite datos.";

/// Configuración del cliente de Groq, leída del entorno
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl GroqConfig {
    /// Lee la configuración desde variables de entorno; la clave es obligatoria
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            AppError::Config(
                "No se encontró la clave API de Groq. Configura la variable de entorno GROQ_API_KEY."
                    .to_string(),
            )
        })?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_url = std::env::var("GROQ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self {
            api_key,
            model,
            api_url,
        })
    }
}

/// Cliente de generación contra la API de chat de Groq
pub struct GroqClient {
    client: Client,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl GenerationClient for GroqClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let story = serde_json::json!({
            "storyTitle": request.story_title,
            "description": request.description,
            "acceptanceCriteria": request.acceptance_criteria,
            "additionalInfo": request.additional_info,
        });

        let request_body = serde_json::json!({
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": format!(
                        "Genera los casos de prueba para esta historia de usuario:\n{}",
                        story
                    )
                }
            ],
            "model": self.config.model,
            "temperature": 0.2,
            "response_format": { "type": "json_object" }
        });

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                AppError::Generation(format!("Error al conectar con la API de Groq: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(groq_api_error(status, response.json::<Value>().await.ok()));
        }

        let json = response.json::<Value>().await.map_err(|e| {
            AppError::Generation(format!(
                "Error al procesar la respuesta de la API de Groq: {}",
                e
            ))
        })?;

        parse_generation_response(&json)
    }
}

fn groq_api_error(status: reqwest::StatusCode, body: Option<Value>) -> AppError {
    if let Some(error) = body
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(|e| e.as_object())
    {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Error desconocido");
        AppError::Generation(format!("Error de la API de Groq: {}", message))
    } else {
        AppError::Generation(format!("Error de la API de Groq: {}", status))
    }
}

/// Extrae los casos y el consumo de tokens de la respuesta de chat de Groq
pub fn parse_generation_response(json: &Value) -> Result<GenerationResponse> {
    let content = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or_else(|| {
            AppError::Generation("No se pudo obtener la respuesta de la API de Groq".to_string())
        })?;

    let mut cases = parse_cases(content)?;
    assign_missing_ids(&mut cases);

    let model = json
        .get("model")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string());
    let usage = json.get("usage");

    Ok(GenerationResponse {
        cases,
        model,
        prompt_tokens: token_count(usage, "prompt_tokens"),
        completion_tokens: token_count(usage, "completion_tokens"),
    })
}

fn token_count(usage: Option<&Value>, field: &str) -> u32 {
    usage
        .and_then(|u| u.get(field))
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32
}

/// Interpreta el contenido del mensaje: un objeto {"cases": [...]} o una lista directa
fn parse_cases(content: &str) -> Result<Vec<TestCase>> {
    let cleaned = strip_code_fences(content);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        AppError::Generation(format!("Error al interpretar los casos generados: {}", e))
    })?;

    let list = match value.get("cases") {
        Some(cases) => cases.clone(),
        None => value,
    };

    serde_json::from_value(list).map_err(|e| {
        AppError::Generation(format!("Error al interpretar los casos generados: {}", e))
    })
}

/// Quita las vallas de código que algunos modelos añaden alrededor del JSON
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Completa los identificadores en blanco para que la tabla pueda expandirlos
fn assign_missing_ids(cases: &mut [TestCase]) {
    for (index, case) in cases.iter_mut().enumerate() {
        if case.id.trim().is_empty() {
            let prefix = Uuid::new_v4()
                .to_string()
                .split('-')
                .next()
                .unwrap_or("TC")
                .to_string();
            case.id = format!("TC-{:02}-{}", index + 1, prefix);
        }
    }
}
