use std::path::PathBuf;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use doc_intake::application::services::IntakeService;
use doc_intake::config::Settings;
use doc_intake::domain::BatchStatus;
use doc_intake::infrastructure::observability::{init_tracing, TracingConfig};
use doc_intake::infrastructure::pdf::LopdfSplitter;
use doc_intake::infrastructure::persistence::PgSisClient;

/// Standalone batch runner: picks up the first PDF from the configured
/// input folder and archives the documents it contains.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default());
    let settings = Settings::from_env();

    if settings.test_run {
        tracing::info!("Running in test mode. No changes will be made to the database.");
    }

    let input_pdf = find_pdf_in_dir(&settings.input_directory)?;
    let filename = input_pdf
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.pdf")
        .to_string();
    let data = std::fs::read(&input_pdf)?;
    tracing::info!(file = %input_pdf.display(), bytes = data.len(), "Processing PDF");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    let sis = Arc::new(PgSisClient::new(pool));
    let pdf = Arc::new(LopdfSplitter::new());
    let service = IntakeService::new(sis, pdf, &settings.intake)?;

    let result = service
        .process_iep_batch(&data, &filename, settings.test_run)
        .await;

    for doc in &result.extracted_docs {
        tracing::info!(
            student_id = %doc.stu_id,
            date = %doc.document_date,
            file = %doc.file,
            pages = doc.pages,
            "Archived"
        );
    }
    for error in &result.errors {
        tracing::warn!(student_id = %error.stu_id, message = %error.message, "Failed");
    }
    tracing::info!(
        status = result.status.as_str(),
        total = result.total_documents,
        "Batch complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.status == BatchStatus::Error {
        std::process::exit(1);
    }
    Ok(())
}

fn find_pdf_in_dir(dir: &str) -> anyhow::Result<PathBuf> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            return Ok(path);
        }
    }
    anyhow::bail!("no PDF files found in {dir}")
}
