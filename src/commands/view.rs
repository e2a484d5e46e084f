use colored::*;
use inquire::Select;

use crate::error::Result;
use crate::models::{category_color, GenerationSession, TestCase};

const EXPANDED_MARKER: &str = "▼";
const COLLAPSED_MARKER: &str = "▶";

/// Muestra la tabla de resultados y permite expandir o colapsar cada caso
pub fn view_results(session: &mut GenerationSession) -> Result<()> {
    if session.results().is_none() {
        println!(
            "{}",
            "Aún no hay resultados. Genera casos de prueba primero.".yellow()
        );
        return Ok(());
    }

    loop {
        print_results(session);

        // Recolectar ids y etiquetas antes de mutar la sesión
        let mut labels: Vec<(String, String)> = Vec::new();
        if let Some(response) = session.results() {
            for case in &response.cases {
                let action = if session.is_expanded(&case.id) {
                    "Colapsar"
                } else {
                    "Expandir"
                };
                labels.push((
                    case.id.clone(),
                    format!("{} {}: {}", action, case.id, case.title),
                ));
            }
        }

        if labels.is_empty() {
            println!("{}", "La generación no devolvió casos de prueba.".yellow());
            return Ok(());
        }

        let back = "Volver al menú".to_string();
        let mut options: Vec<String> = labels.iter().map(|(_, label)| label.clone()).collect();
        options.push(back.clone());

        let selection = Select::new("¿Qué deseas hacer?", options).prompt();

        match selection {
            Ok(choice) => {
                if choice == back {
                    break;
                }
                if let Some((id, _)) = labels.iter().find(|(_, label)| *label == choice) {
                    session.toggle_expansion(id);
                }
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// Imprime el encabezado, la línea de resumen y la tabla de casos,
/// con los pasos de los casos expandidos debajo de cada fila
pub fn print_results(session: &GenerationSession) {
    let response = match session.results() {
        Some(response) => response,
        None => return,
    };

    println!("\n{}", "Casos de Prueba Generados".bold());

    let mut meta = format!("{} caso(s) de prueba generados", response.cases.len());
    if let Some(model) = &response.model {
        meta.push_str(&format!(" • Modelo: {}", model));
    }
    if response.has_token_usage() {
        meta.push_str(&format!(" • Tokens: {}", response.total_tokens()));
    }
    println!("{}", meta.blue());

    if response.cases.is_empty() {
        return;
    }

    // Anchos sobre el texto plano; el color se aplica después del relleno
    let mut id_width = "ID".chars().count();
    let mut title_width = "Título".chars().count();
    let mut category_width = "Categoría".chars().count();
    for case in &response.cases {
        id_width = id_width.max(case.id.chars().count());
        title_width = title_width.max(case.title.chars().count());
        category_width = category_width.max(case.category.chars().count());
    }

    println!(
        "{}",
        format!(
            "  {:<id_width$}  {:<title_width$}  {:<category_width$}  Resultado esperado",
            "ID", "Título", "Categoría"
        )
        .bold()
    );

    for case in &response.cases {
        let expanded = session.is_expanded(&case.id);
        let marker = if expanded {
            EXPANDED_MARKER
        } else {
            COLLAPSED_MARKER
        };

        let padded_category = format!("{:<category_width$}", case.category);
        let category = match category_color(&case.category) {
            Some(color) => padded_category.color(color).to_string(),
            None => padded_category,
        };

        println!(
            "{} {:<id_width$}  {:<title_width$}  {}  {}",
            marker, case.id, case.title, category, case.expected_result
        );

        if expanded {
            if case.steps.is_empty() {
                println!("    {}", "Sin pasos registrados.".yellow());
                continue;
            }
            println!("    Pasos de {}:", case.id);
            for (index, step) in case.steps.iter().enumerate() {
                println!(
                    "    {} | {} | {} | {}",
                    TestCase::step_id(index).blue(),
                    step,
                    case.test_data_display(),
                    case.step_expected_result(index)
                );
            }
        }
    }
}
