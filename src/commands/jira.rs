use colored::*;
use inquire::{Password, Select, Text};

use crate::error::Result;
use crate::models::{JiraApi, JiraCredentials, JiraLink};

const CLEAR_SELECTION: &str = "Quitar selección";

/// Menú de la integración con JIRA: conexión, tickets enlazados y selección
pub fn jira_integration(link: &mut JiraLink, api: &dyn JiraApi) -> Result<()> {
    loop {
        if link.is_connected() {
            println!("{}", "✅ Conectado a JIRA".green());
            if let Some(ticket) = link.selected_ticket() {
                println!("Ticket seleccionado: {}", ticket);
            }

            let options = vec!["Seleccionar un ticket enlazado", "Desconectar", "Volver"];
            let selection = Select::new("¿Qué deseas hacer?", options).prompt();

            match selection {
                Ok("Seleccionar un ticket enlazado") => select_ticket(link),
                Ok("Desconectar") => {
                    link.disconnect();
                    println!("{}", "Desconectado de JIRA.".yellow());
                }
                _ => break,
            }
        } else {
            let options = vec!["Conectar con JIRA", "Volver"];
            let selection = Select::new("¿Qué deseas hacer?", options).prompt();

            match selection {
                Ok("Conectar con JIRA") => connect(link, api),
                _ => break,
            }
        }
    }

    Ok(())
}

/// Pide los datos de la cuenta y establece la conexión. Tras un intento
/// fallido la URL y el correo quedan como valores iniciales; el token se
/// vuelve a teclear siempre. Esc cierra el formulario sin tocar nada.
fn connect(link: &mut JiraLink, api: &dyn JiraApi) {
    let current = link.credentials().clone();

    let base_url = match Text::new("URL de JIRA:")
        .with_placeholder("https://tu-dominio.atlassian.net")
        .with_initial_value(&current.base_url)
        .prompt()
    {
        Ok(value) => value,
        Err(_) => {
            println!("{}", "Operación cancelada.".yellow());
            return;
        }
    };

    let email = match Text::new("Correo electrónico:")
        .with_placeholder("tu-correo@ejemplo.com")
        .with_initial_value(&current.email)
        .prompt()
    {
        Ok(value) => value,
        Err(_) => {
            println!("{}", "Operación cancelada.".yellow());
            return;
        }
    };

    let api_token = match Password::new("Token de API:").without_confirmation().prompt() {
        Ok(value) => value,
        Err(_) => {
            println!("{}", "Operación cancelada.".yellow());
            return;
        }
    };

    link.set_credentials(JiraCredentials {
        base_url,
        email,
        api_token,
    });

    match link.connect(api) {
        Ok(()) => {
            println!("{}", "✅ Conexión con JIRA establecida.".green());
            println!(
                "{}",
                format!("{} tickets enlazados disponibles.", link.tickets().len()).blue()
            );
        }
        Err(e) => println!("{}", e.to_string().red()),
    }
}

/// Elige uno de los tickets enlazados o quita la selección actual
fn select_ticket(link: &mut JiraLink) {
    if link.tickets().is_empty() {
        println!("{}", "No hay tickets enlazados disponibles.".yellow());
        return;
    }

    let mut options: Vec<String> = link.tickets().to_vec();
    options.push(CLEAR_SELECTION.to_string());

    let selection = Select::new("Selecciona un ticket de JIRA:", options).prompt();

    match selection {
        Ok(choice) => {
            if choice == CLEAR_SELECTION {
                link.select_ticket("");
                println!("{}", "Selección quitada.".yellow());
            } else {
                link.select_ticket(&choice);
                println!("{}", format!("Seleccionado: {}", choice).green());
            }
        }
        Err(_) => println!("{}", "Operación cancelada.".yellow()),
    }
}
