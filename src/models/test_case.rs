use colored::Color;
use serde::{Deserialize, Serialize};

/// Texto mostrado cuando un caso no trae datos de prueba
pub const TEST_DATA_PLACEHOLDER: &str = "N/A";

/// Resultado esperado de todo paso que no sea el último
pub const INTERMEDIATE_STEP_RESULT: &str = "Paso completado correctamente";

/// Caso de prueba generado para una historia de usuario
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "expected_result")]
    pub expected_result: String,
    #[serde(default, alias = "test_data")]
    pub test_data: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl TestCase {
    /// Identificador correlativo del paso: S01, S02, ...
    pub fn step_id(index: usize) -> String {
        format!("S{:02}", index + 1)
    }

    /// Datos de prueba o el marcador N/A si el caso no trae ninguno
    pub fn test_data_display(&self) -> &str {
        match self.test_data.as_deref() {
            Some(data) if !data.trim().is_empty() => data,
            _ => TEST_DATA_PLACEHOLDER,
        }
    }

    /// Resultado esperado de un paso: el del caso en el último, texto fijo en el resto
    pub fn step_expected_result(&self, index: usize) -> &str {
        if index + 1 == self.steps.len() {
            &self.expected_result
        } else {
            INTERMEDIATE_STEP_RESULT
        }
    }
}

/// Color asociado a cada categoría conocida
pub fn category_color(category: &str) -> Option<Color> {
    match category.to_lowercase().as_str() {
        "positive" => Some(Color::Green),
        "negative" => Some(Color::Red),
        "edge" => Some(Color::Yellow),
        "authorization" => Some(Color::Magenta),
        "non-functional" => Some(Color::Blue),
        _ => None,
    }
}
