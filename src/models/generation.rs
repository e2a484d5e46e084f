use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::TestCase;

/// Mensaje fijo cuando faltan los campos obligatorios del formulario
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "El Título de la Historia y los Criterios de Aceptación son obligatorios";

/// Historia de usuario tal como se envía al servicio de generación
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub story_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub additional_info: String,
}

/// Campos editables del formulario de la historia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    StoryTitle,
    Description,
    AcceptanceCriteria,
    AdditionalInfo,
}

impl GenerationRequest {
    /// Actualiza un campo del formulario sin validar nada
    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::StoryTitle => self.story_title = value,
            FormField::Description => self.description = value,
            FormField::AcceptanceCriteria => self.acceptance_criteria = value,
            FormField::AdditionalInfo => self.additional_info = value,
        }
    }

    /// Devuelve el valor actual de un campo
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::StoryTitle => &self.story_title,
            FormField::Description => &self.description,
            FormField::AcceptanceCriteria => &self.acceptance_criteria,
            FormField::AdditionalInfo => &self.additional_info,
        }
    }

    /// Título y criterios de aceptación no pueden quedar vacíos (ignorando espacios)
    pub fn has_required_fields(&self) -> bool {
        !self.story_title.trim().is_empty() && !self.acceptance_criteria.trim().is_empty()
    }
}

/// Respuesta del servicio de generación
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, alias = "prompt_tokens")]
    pub prompt_tokens: u32,
    #[serde(default, alias = "completion_tokens")]
    pub completion_tokens: u32,
}

impl GenerationResponse {
    /// Suma de tokens consumidos por la llamada
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }

    /// El consumo solo se muestra cuando hay conteo de entrada
    pub fn has_token_usage(&self) -> bool {
        self.prompt_tokens > 0
    }
}

/// Frontera con el servicio remoto: una solicitud, una respuesta o un error
#[async_trait]
pub trait GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
