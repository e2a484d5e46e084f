use crate::error::{AppError, Result};
use crate::models::{JiraApi, JiraCredentials, JiraStory};

/// Tickets de demostración que devuelve la conexión simulada
pub const DEMO_TICKETS: [&str; 5] = ["PROJ-123", "PROJ-456", "PROJ-789", "PROJ-101", "PROJ-202"];

/// Tracker de demostración: acepta cualquier credencial completa y nunca
/// sale de la máquina. La implementación real entrará por el mismo trait.
#[derive(Debug, Default)]
pub struct MockJiraApi;

impl JiraApi for MockJiraApi {
    fn connect(&self, _credentials: &JiraCredentials) -> Result<()> {
        Ok(())
    }

    fn list_linked_tickets(&self) -> Result<Vec<String>> {
        Ok(DEMO_TICKETS.iter().map(|t| t.to_string()).collect())
    }

    fn fetch_story(&self, story_id: &str) -> Result<JiraStory> {
        // TODO: integrar la API real de JIRA
        Err(AppError::Jira(format!(
            "Demo: se obtendría la historia {} desde JIRA",
            story_id
        )))
    }
}
