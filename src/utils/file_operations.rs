use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::models::{GenerationResponse, TestCase};

/// Directorio donde se guardan los archivos exportados
pub const EXPORTS_DIR: &str = "exports";

/// Convierte el título de la historia en un nombre de archivo seguro
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "casos-de-prueba".to_string()
    } else {
        slug
    }
}

/// Nombre de archivo con el título de la historia y la fecha de exportación
pub fn export_file_name(story_title: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", slugify(story_title), timestamp, extension)
}

/// Crea el directorio de exportaciones si aún no existe
pub fn ensure_exports_dir() -> Result<PathBuf> {
    let dir = PathBuf::from(EXPORTS_DIR);
    if !dir.exists() {
        fs::create_dir(&dir)?;
    }
    Ok(dir)
}

#[derive(Serialize)]
struct StepRow<'a> {
    case_id: &'a str,
    title: &'a str,
    category: &'a str,
    step_id: String,
    step: &'a str,
    test_data: &'a str,
    expected_result: &'a str,
}

/// Guarda los casos en CSV, con una fila por paso
pub fn save_to_csv(file_path: &Path, cases: &[TestCase]) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    for case in cases {
        if case.steps.is_empty() {
            writer.serialize(StepRow {
                case_id: &case.id,
                title: &case.title,
                category: &case.category,
                step_id: String::new(),
                step: "",
                test_data: case.test_data_display(),
                expected_result: &case.expected_result,
            })?;
            continue;
        }

        for (index, step) in case.steps.iter().enumerate() {
            writer.serialize(StepRow {
                case_id: &case.id,
                title: &case.title,
                category: &case.category,
                step_id: TestCase::step_id(index),
                step,
                test_data: case.test_data_display(),
                expected_result: case.step_expected_result(index),
            })?;
        }
    }

    writer.flush()?;

    Ok(())
}

/// Guarda los casos en formato Markdown con resumen por categoría
pub fn save_to_markdown(
    file_path: &Path,
    response: &GenerationResponse,
    story_title: &str,
) -> Result<()> {
    let mut file = File::create(file_path)?;
    let cases = &response.cases;

    // Escribir encabezado
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "# Casos de Prueba: {}", story_title)?;
    writeln!(file, "\nFecha de generación: {}", timestamp)?;

    if let Some(model) = &response.model {
        writeln!(file, "Modelo: {}", model)?;
    }
    if response.has_token_usage() {
        writeln!(file, "Tokens consumidos: {}", response.total_tokens())?;
    }
    writeln!(file, "")?;

    // Calcular resumen
    let positive = cases
        .iter()
        .filter(|tc| tc.category.eq_ignore_ascii_case("positive"))
        .count();
    let negative = cases
        .iter()
        .filter(|tc| tc.category.eq_ignore_ascii_case("negative"))
        .count();
    let edge = cases
        .iter()
        .filter(|tc| tc.category.eq_ignore_ascii_case("edge"))
        .count();
    let authorization = cases
        .iter()
        .filter(|tc| tc.category.eq_ignore_ascii_case("authorization"))
        .count();
    let non_functional = cases
        .iter()
        .filter(|tc| tc.category.eq_ignore_ascii_case("non-functional"))
        .count();
    let other = cases.len() - positive - negative - edge - authorization - non_functional;

    // Escribir resumen textual primero
    writeln!(file, "## Resumen Numérico\n")?;
    writeln!(file, "- Total de casos: {}", cases.len())?;
    writeln!(file, "- ✅ Positivos: {}", positive)?;
    writeln!(file, "- ❌ Negativos: {}", negative)?;
    writeln!(file, "- ⚠️ De borde: {}", edge)?;
    writeln!(file, "- 🔐 De autorización: {}", authorization)?;
    writeln!(file, "- ⚙️ No funcionales: {}", non_functional)?;
    if other > 0 {
        writeln!(file, "- ❓ Otras categorías: {}", other)?;
    }
    writeln!(file, "")?;

    // Crear gráfico circular con Mermaid
    writeln!(file, "## Resumen Visual\n")?;
    writeln!(file, "```mermaid")?;
    writeln!(file, "pie title Distribución por Categoría")?;

    // Añadir secciones al gráfico solo si tienen valores mayores que cero
    if positive > 0 {
        writeln!(file, "    \"✅ Positivos\" : {}", positive)?; // Verde
    }
    if negative > 0 {
        writeln!(file, "    \"❌ Negativos\" : {}", negative)?; // Rojo
    }
    if edge > 0 {
        writeln!(file, "    \"⚠️ De borde\" : {}", edge)?; // Amarillo
    }
    if authorization > 0 {
        writeln!(file, "    \"🔐 De autorización\" : {}", authorization)?; // Magenta
    }
    if non_functional > 0 {
        writeln!(file, "    \"⚙️ No funcionales\" : {}", non_functional)?; // Azul
    }
    if other > 0 {
        writeln!(file, "    \"❓ Otras\" : {}", other)?;
    }
    writeln!(file, "```\n")?;

    // Escribir detalles de cada caso de prueba
    writeln!(file, "## Detalle de Casos de Prueba\n")?;
    for (i, case) in cases.iter().enumerate() {
        writeln!(file, "### {}. {}", i + 1, case.title)?;
        writeln!(file, "- **ID**: {}", case.id)?;
        writeln!(file, "- **Categoría**: {}", case.category)?;
        writeln!(file, "- **Resultado esperado**: {}", case.expected_result)?;
        writeln!(file, "")?;

        if case.steps.is_empty() {
            writeln!(file, "Sin pasos registrados.\n")?;
            continue;
        }

        writeln!(
            file,
            "| Paso | Descripción | Datos de prueba | Resultado esperado |"
        )?;
        writeln!(file, "| --- | --- | --- | --- |")?;
        for (index, step) in case.steps.iter().enumerate() {
            writeln!(
                file,
                "| {} | {} | {} | {} |",
                TestCase::step_id(index),
                step,
                case.test_data_display(),
                case.step_expected_result(index)
            )?;
        }
        writeln!(file, "")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "test-case-generator-{prefix}-{nanos}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("crear directorio temporal");
        path
    }

    fn sample_cases() -> Vec<TestCase> {
        vec![
            TestCase {
                id: "TC-01".to_string(),
                title: "Login exitoso".to_string(),
                category: "positive".to_string(),
                expected_result: "El usuario accede al panel".to_string(),
                test_data: Some("usuario: ana".to_string()),
                steps: vec![
                    "Abrir la página de login".to_string(),
                    "Ingresar credenciales válidas".to_string(),
                ],
            },
            TestCase {
                id: "TC-02".to_string(),
                title: "Login con contraseña inválida".to_string(),
                category: "negative".to_string(),
                expected_result: "Se muestra un mensaje de error".to_string(),
                test_data: None,
                steps: vec![
                    "Abrir la página de login".to_string(),
                    "Ingresar una contraseña inválida".to_string(),
                    "Presionar Ingresar".to_string(),
                ],
            },
        ]
    }

    fn sample_response() -> GenerationResponse {
        GenerationResponse {
            cases: sample_cases(),
            model: Some("llama-3.3-70b-versatile".to_string()),
            prompt_tokens: 200,
            completion_tokens: 80,
        }
    }

    #[test]
    fn el_slug_conserva_letras_y_une_con_guiones() {
        assert_eq!(slugify("Login con Email"), "login-con-email");
        assert_eq!(slugify("  Registro  de   usuarios "), "registro-de-usuarios");
    }

    #[test]
    fn el_slug_conserva_los_acentos_del_titulo() {
        assert_eq!(slugify("Búsqueda rápida"), "búsqueda-rápida");
    }

    #[test]
    fn un_titulo_sin_caracteres_utiles_usa_el_nombre_generico() {
        assert_eq!(slugify(""), "casos-de-prueba");
        assert_eq!(slugify("!!! ???"), "casos-de-prueba");
    }

    #[test]
    fn el_nombre_de_archivo_lleva_slug_fecha_y_extension() {
        let name = export_file_name("Login con Email", "csv");
        assert!(name.starts_with("login-con-email_"));
        assert!(name.ends_with(".csv"));
        // slug + '_' + AAAAMMDD_HHMMSS + ".csv"
        assert_eq!(name.len(), "login-con-email".len() + 1 + 15 + 4);
    }

    #[test]
    fn el_csv_lleva_una_fila_por_paso() {
        let dir = unique_temp_dir("csv");
        let path = dir.join("casos.csv");

        save_to_csv(&path, &sample_cases()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents
            .starts_with("case_id,title,category,step_id,step,test_data,expected_result"));
        assert!(contents.contains("TC-01,Login exitoso,positive,S01,Abrir la página de login"));
        assert!(contents
            .contains("S02,Ingresar credenciales válidas,usuario: ana,El usuario accede al panel"));
        assert!(contents.contains(
            "TC-02,Login con contraseña inválida,negative,S01,Abrir la página de login,N/A"
        ));
        assert_eq!(contents.lines().count(), 6);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn un_caso_sin_pasos_deja_una_fila_con_su_resultado() {
        let dir = unique_temp_dir("csv-sin-pasos");
        let path = dir.join("casos.csv");
        let cases = vec![TestCase {
            id: "TC-01".to_string(),
            title: "Caso sin pasos".to_string(),
            category: "edge".to_string(),
            expected_result: "Resultado directo".to_string(),
            test_data: None,
            steps: vec![],
        }];

        save_to_csv(&path, &cases).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents.contains("TC-01,Caso sin pasos,edge,,,N/A,Resultado directo"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn el_markdown_lleva_resumen_grafico_y_detalle() {
        let dir = unique_temp_dir("md");
        let path = dir.join("casos.md");

        save_to_markdown(&path, &sample_response(), "Login con Email").unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents.contains("# Casos de Prueba: Login con Email"));
        assert!(contents.contains("Modelo: llama-3.3-70b-versatile"));
        assert!(contents.contains("Tokens consumidos: 280"));
        assert!(contents.contains("- Total de casos: 2"));
        assert!(contents.contains("```mermaid"));
        assert!(contents.contains("\"✅ Positivos\" : 1"));
        assert!(contents.contains("\"❌ Negativos\" : 1"));
        // las categorías sin casos no entran al gráfico
        assert!(!contents.contains("\"⚠️ De borde\""));
        assert!(contents.contains("### 1. Login exitoso"));
        assert!(contents.contains(
            "| S02 | Ingresar credenciales válidas | usuario: ana | El usuario accede al panel |"
        ));
        assert!(contents.contains(
            "| S03 | Presionar Ingresar | N/A | Se muestra un mensaje de error |"
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn el_markdown_sin_consumo_omite_los_tokens() {
        let dir = unique_temp_dir("md-sin-tokens");
        let path = dir.join("casos.md");
        let mut response = sample_response();
        response.prompt_tokens = 0;
        response.model = None;

        save_to_markdown(&path, &response, "Historia").unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(!contents.contains("Tokens consumidos"));
        assert!(!contents.contains("Modelo:"));

        let _ = fs::remove_dir_all(&dir);
    }
}
