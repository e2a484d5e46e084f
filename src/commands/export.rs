use colored::*;
use inquire::Select;

use crate::error::Result;
use crate::models::{FormField, GenerationSession};
use crate::utils::{ensure_exports_dir, export_file_name, save_to_csv, save_to_markdown};

/// Exporta los resultados vigentes a CSV o Markdown bajo exports/
pub fn export_results(session: &GenerationSession) -> Result<()> {
    let response = match session.results() {
        Some(response) => response,
        None => {
            println!("{}", "Aún no hay resultados para exportar.".yellow());
            return Ok(());
        }
    };

    if response.cases.is_empty() {
        println!("{}", "La generación no devolvió casos de prueba.".yellow());
        return Ok(());
    }

    let options = vec!["CSV", "Markdown"];
    let selection = Select::new("Selecciona el formato de exportación:", options).prompt();

    let story_title = session.form().field(FormField::StoryTitle);

    match selection {
        Ok("CSV") => {
            let dir = ensure_exports_dir()?;
            let path = dir.join(export_file_name(story_title, "csv"));
            save_to_csv(&path, &response.cases)?;
            println!(
                "{}",
                format!("Resultados exportados en {}", path.display()).green()
            );
        }
        Ok("Markdown") => {
            let dir = ensure_exports_dir()?;
            let path = dir.join(export_file_name(story_title, "md"));
            save_to_markdown(&path, response, story_title)?;
            println!(
                "{}",
                format!("Resultados exportados en {}", path.display()).green()
            );
        }
        _ => println!("{}", "Operación cancelada.".yellow()),
    }

    Ok(())
}
