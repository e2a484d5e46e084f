use clap::{Parser, Subcommand};
use colored::*;
use inquire::Select;

mod commands;
mod error;
mod models;
mod utils;

use commands::{export_results, generate_test_cases, jira_integration, view_results};
use models::{FormField, GenerationSession, JiraLink};
use utils::{GroqClient, GroqConfig, MockJiraApi};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generar casos de prueba para una historia de usuario
    Generate {
        /// Título de la historia
        #[arg(short, long)]
        title: Option<String>,

        /// Criterios de aceptación
        #[arg(short, long)]
        criteria: Option<String>,
    },
}

#[tokio::main]
async fn main() -> error::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut session = GenerationSession::new();
    let mut jira_link = JiraLink::new();
    let jira_api = MockJiraApi;

    // Sin clave de API se puede navegar, pero no generar
    let client = GroqConfig::from_env().map(GroqClient::new);
    if let Err(e) = &client {
        println!("{}", e.to_string().yellow());
    }

    match cli.command {
        Some(Commands::Generate { title, criteria }) => {
            if let Some(title) = title {
                session.edit_field(FormField::StoryTitle, title);
            }
            if let Some(criteria) = criteria {
                session.edit_field(FormField::AcceptanceCriteria, criteria);
            }
            match &client {
                Ok(client) => generate_test_cases(&mut session, client, &jira_api).await?,
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
        None => loop {
            // Menú interactivo si no se proporciona un comando
            let options = vec![
                "Generar casos de prueba",
                "Ver resultados",
                "Exportar resultados",
                "Integración con JIRA",
                "Salir",
            ];

            let selection = Select::new("¿Qué deseas hacer?", options).prompt();

            match selection {
                Ok("Generar casos de prueba") => match &client {
                    Ok(client) => {
                        if let Err(e) = generate_test_cases(&mut session, client, &jira_api).await
                        {
                            println!("{}", e.to_string().red());
                        }
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                },
                Ok("Ver resultados") => {
                    if let Err(e) = view_results(&mut session) {
                        println!("{}", e.to_string().red());
                    }
                }
                Ok("Exportar resultados") => {
                    if let Err(e) = export_results(&session) {
                        println!("{}", e.to_string().red());
                    }
                }
                Ok("Integración con JIRA") => {
                    if let Err(e) = jira_integration(&mut jira_link, &jira_api) {
                        println!("{}", e.to_string().red());
                    }
                }
                _ => {
                    println!("¡Hasta pronto!");
                    break;
                }
            }
        },
    }

    Ok(())
}
