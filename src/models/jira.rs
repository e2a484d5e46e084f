use crate::error::Result;

/// Mensaje fijo cuando faltan datos de la cuenta de JIRA
pub const JIRA_CREDENTIALS_MESSAGE: &str = "Completa todos los datos de la cuenta de JIRA";

/// Datos de acceso a la cuenta de JIRA
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JiraCredentials {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl JiraCredentials {
    /// Los tres datos son obligatorios para conectar
    pub fn is_complete(&self) -> bool {
        !self.base_url.is_empty() && !self.email.is_empty() && !self.api_token.is_empty()
    }
}

/// Historia de usuario tal como la devolvería el tracker
#[derive(Debug, Clone)]
pub struct JiraStory {
    pub title: String,
    pub description: String,
    pub acceptance_criteria: String,
}

/// Operaciones contra el tracker. La implementación real es sustituible;
/// hoy solo existe una de demostración que no sale de la máquina.
pub trait JiraApi {
    fn connect(&self, credentials: &JiraCredentials) -> Result<()>;
    fn list_linked_tickets(&self) -> Result<Vec<String>>;
    fn fetch_story(&self, story_id: &str) -> Result<JiraStory>;
}

/// Estado de la vinculación con JIRA: conexión, tickets enlazados y selección
#[derive(Debug, Default)]
pub struct JiraLink {
    connected: bool,
    credentials: JiraCredentials,
    tickets: Vec<String>,
    selected: Option<String>,
}

impl JiraLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn tickets(&self) -> &[String] {
        &self.tickets
    }

    pub fn selected_ticket(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn credentials(&self) -> &JiraCredentials {
        &self.credentials
    }

    /// Guarda lo tecleado en el formulario de la cuenta; no valida nada
    pub fn set_credentials(&mut self, credentials: JiraCredentials) {
        self.credentials = credentials;
    }

    /// Conecta con las credenciales guardadas y carga los tickets enlazados.
    /// Con datos incompletos no se llega a tocar el tracker.
    pub fn connect(&mut self, api: &dyn JiraApi) -> Result<()> {
        if !self.credentials.is_complete() {
            return Err(crate::error::AppError::Jira(
                JIRA_CREDENTIALS_MESSAGE.to_string(),
            ));
        }
        api.connect(&self.credentials)?;
        self.tickets = api.list_linked_tickets()?;
        self.connected = true;
        Ok(())
    }

    /// Corta la conexión y descarta tickets, selección y credenciales
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.credentials = JiraCredentials::default();
        self.tickets.clear();
        self.selected = None;
    }

    /// Cambia el ticket seleccionado; una cadena vacía limpia la selección
    pub fn select_ticket(&mut self, ticket: &str) {
        if ticket.is_empty() {
            self.selected = None;
        } else {
            self.selected = Some(ticket.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct FakeJira {
        reject_connect: bool,
    }

    impl JiraApi for FakeJira {
        fn connect(&self, _credentials: &JiraCredentials) -> Result<()> {
            if self.reject_connect {
                Err(AppError::Jira("Error de JIRA: credenciales rechazadas".to_string()))
            } else {
                Ok(())
            }
        }

        fn list_linked_tickets(&self) -> Result<Vec<String>> {
            Ok(vec!["QA-1".to_string(), "QA-2".to_string()])
        }

        fn fetch_story(&self, story_id: &str) -> Result<JiraStory> {
            Ok(JiraStory {
                title: format!("Historia {}", story_id),
                description: String::new(),
                acceptance_criteria: String::new(),
            })
        }
    }

    fn full_credentials() -> JiraCredentials {
        JiraCredentials {
            base_url: "https://empresa.atlassian.net".to_string(),
            email: "qa@empresa.com".to_string(),
            api_token: "token-123".to_string(),
        }
    }

    #[test]
    fn las_credenciales_exigen_los_tres_datos() {
        assert!(full_credentials().is_complete());

        let mut credentials = full_credentials();
        credentials.api_token = String::new();
        assert!(!credentials.is_complete());

        credentials = full_credentials();
        credentials.email = String::new();
        assert!(!credentials.is_complete());
    }

    #[test]
    fn conectar_con_datos_incompletos_no_toca_el_tracker() {
        let api = FakeJira {
            reject_connect: true,
        };
        let mut link = JiraLink::new();
        let mut credentials = full_credentials();
        credentials.base_url = String::new();
        link.set_credentials(credentials.clone());

        let err = link.connect(&api).unwrap_err();

        assert_eq!(err.to_string(), JIRA_CREDENTIALS_MESSAGE);
        assert!(!link.is_connected());
        assert!(link.tickets().is_empty());
        // lo tecleado se conserva para el siguiente intento
        assert_eq!(link.credentials(), &credentials);
    }

    #[test]
    fn conectar_carga_los_tickets_enlazados() {
        let api = FakeJira {
            reject_connect: false,
        };
        let mut link = JiraLink::new();
        link.set_credentials(full_credentials());

        link.connect(&api).unwrap();

        assert!(link.is_connected());
        assert_eq!(link.tickets(), ["QA-1".to_string(), "QA-2".to_string()]);
        assert_eq!(link.credentials(), &full_credentials());
    }

    #[test]
    fn un_rechazo_del_tracker_deja_la_vinculacion_desconectada() {
        let api = FakeJira {
            reject_connect: true,
        };
        let mut link = JiraLink::new();
        link.set_credentials(full_credentials());

        assert!(link.connect(&api).is_err());
        assert!(!link.is_connected());
    }

    #[test]
    fn desconectar_descarta_todo_el_estado() {
        let api = FakeJira {
            reject_connect: false,
        };
        let mut link = JiraLink::new();
        link.set_credentials(full_credentials());
        link.connect(&api).unwrap();
        link.select_ticket("QA-1");

        link.disconnect();

        assert!(!link.is_connected());
        assert!(link.tickets().is_empty());
        assert!(link.selected_ticket().is_none());
        assert_eq!(link.credentials(), &JiraCredentials::default());
    }

    #[test]
    fn seleccionar_con_cadena_vacia_limpia_la_seleccion() {
        let mut link = JiraLink::new();
        link.select_ticket("QA-2");
        assert_eq!(link.selected_ticket(), Some("QA-2"));

        link.select_ticket("");
        assert!(link.selected_ticket().is_none());
    }
}
