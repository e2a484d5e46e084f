use std::collections::HashSet;

use crate::models::{FormField, GenerationRequest, GenerationResponse, REQUIRED_FIELDS_MESSAGE};

/// Mensaje genérico cuando la generación falla sin detalle
pub const GENERIC_GENERATION_ERROR: &str = "No se pudieron generar los casos de prueba";

/// Comprobante de un envío en curso; las finalizaciones que no lo presentan se ignoran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Motivos por los que un envío no llega a iniciarse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    MissingRequiredFields,
    SubmissionInFlight,
}

/// Estado de una sesión de generación: formulario, envío en curso,
/// resultados vigentes y qué casos están expandidos en la tabla.
#[derive(Debug, Default)]
pub struct GenerationSession {
    form: GenerationRequest,
    loading: bool,
    error: Option<String>,
    results: Option<GenerationResponse>,
    expanded: HashSet<String>,
    submission_seq: u64,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &GenerationRequest {
        &self.form
    }

    /// Edita un campo del formulario; nunca se rechaza una edición
    pub fn edit_field(&mut self, field: FormField, value: String) {
        self.form.set_field(field, value);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> Option<&GenerationResponse> {
        self.results.as_ref()
    }

    pub fn is_expanded(&self, case_id: &str) -> bool {
        self.expanded.contains(case_id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Alterna la expansión de un caso y devuelve si quedó expandido
    pub fn toggle_expansion(&mut self, case_id: &str) -> bool {
        if self.expanded.remove(case_id) {
            false
        } else {
            self.expanded.insert(case_id.to_string());
            true
        }
    }

    /// Inicia un envío. Un envío en curso se rechaza antes de validar;
    /// un formulario incompleto deja el mensaje fijo y no pasa a cargando.
    pub fn begin_submission(
        &mut self,
    ) -> Result<(SubmissionTicket, GenerationRequest), SubmitError> {
        if self.loading {
            return Err(SubmitError::SubmissionInFlight);
        }
        if !self.form.has_required_fields() {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_string());
            return Err(SubmitError::MissingRequiredFields);
        }
        self.submission_seq += 1;
        self.loading = true;
        self.error = None;
        Ok((SubmissionTicket(self.submission_seq), self.form.clone()))
    }

    /// Aplica una respuesta exitosa: reemplaza los resultados y colapsa la tabla.
    /// Los comprobantes vencidos o repetidos no alteran nada.
    pub fn complete_success(&mut self, ticket: SubmissionTicket, response: GenerationResponse) {
        if !self.accepts(ticket) {
            return;
        }
        self.loading = false;
        self.error = None;
        self.results = Some(response);
        self.expanded.clear();
    }

    /// Registra un fallo del envío; los resultados anteriores se conservan.
    /// Un mensaje en blanco cae en el texto genérico.
    pub fn complete_failure(&mut self, ticket: SubmissionTicket, message: &str) {
        if !self.accepts(ticket) {
            return;
        }
        self.loading = false;
        self.error = Some(if message.trim().is_empty() {
            GENERIC_GENERATION_ERROR.to_string()
        } else {
            message.to_string()
        });
    }

    /// Descarta un envío sin resultado ni error, por ejemplo ante una cancelación
    pub fn abandon_submission(&mut self, ticket: SubmissionTicket) {
        if !self.accepts(ticket) {
            return;
        }
        self.loading = false;
    }

    fn accepts(&self, ticket: SubmissionTicket) -> bool {
        self.loading && ticket.0 == self.submission_seq
    }
}
