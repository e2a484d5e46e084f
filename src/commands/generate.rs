use colored::*;
use inquire::Text;

use crate::commands::print_results;
use crate::error::Result;
use crate::models::{FormField, GenerationClient, GenerationSession, JiraApi, SubmitError};

/// Campos del formulario en el orden en que se preguntan
const FORM_FIELDS: [(FormField, &str); 4] = [
    (FormField::StoryTitle, "Título de la historia:"),
    (FormField::Description, "Descripción (opcional):"),
    (FormField::AcceptanceCriteria, "Criterios de aceptación:"),
    (FormField::AdditionalInfo, "Información adicional (opcional):"),
];

/// Recorre el formulario de la historia de usuario y lanza la generación
pub async fn generate_test_cases(
    session: &mut GenerationSession,
    client: &dyn GenerationClient,
    jira: &dyn JiraApi,
) -> Result<()> {
    // Cargar la historia desde JIRA si el usuario indica un ID
    let story_id = match Text::new("ID de historia de JIRA (opcional, Enter para omitir):")
        .with_placeholder("PROJ-123")
        .prompt()
    {
        Ok(story_id) => story_id,
        Err(_) => {
            println!("{}", "Operación cancelada.".yellow());
            return Ok(());
        }
    };

    if !story_id.trim().is_empty() {
        match jira.fetch_story(story_id.trim()) {
            Ok(story) => {
                session.edit_field(FormField::StoryTitle, story.title);
                session.edit_field(FormField::Description, story.description);
                session.edit_field(FormField::AcceptanceCriteria, story.acceptance_criteria);
                println!("{}", "Historia cargada desde JIRA.".green());
            }
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }

    // Completar el formulario campo por campo, partiendo de los valores vigentes
    for (field, label) in FORM_FIELDS {
        let current = session.form().field(field).to_string();
        match Text::new(label).with_initial_value(&current).prompt() {
            Ok(value) => session.edit_field(field, value),
            Err(_) => {
                println!("{}", "Operación cancelada.".yellow());
                return Ok(());
            }
        }
    }

    // Iniciar el envío
    let (ticket, request) = match session.begin_submission() {
        Ok(submission) => submission,
        Err(SubmitError::MissingRequiredFields) => {
            if let Some(error) = session.error() {
                println!("{}", error.red());
            }
            return Ok(());
        }
        Err(SubmitError::SubmissionInFlight) => {
            println!(
                "{}",
                "Ya hay una generación en curso. Espera a que termine.".yellow()
            );
            return Ok(());
        }
    };

    println!("{}", "Generando casos de prueba...".blue());

    match client.generate(&request).await {
        Ok(response) => {
            session.complete_success(ticket, response);
            println!("{}", "Casos de prueba generados.".green());
            print_results(session);
        }
        Err(e) => {
            session.complete_failure(ticket, &e.to_string());
            if let Some(error) = session.error() {
                println!("{}", error.red());
            }
        }
    }

    Ok(())
}
