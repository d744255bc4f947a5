use clap::Parser;
use database::{config::DatabaseConfig, db::create_connection, services::grade::GradeService};
use importer::{error::ImportError, rows::read_grades, util::log_summary};
use log::{error, info};
use std::{fs::File, mem, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(
    name = "import-grades",
    version,
    about = "Import component scores from a CSV file"
)]
struct Cli {
    /// CSV with columns student_id,course_id,academic_year,semester,assignment,midterm,final_exam
    #[arg(long, short = 'f')]
    file: PathBuf,
}

async fn run(cli: Cli) -> Result<(), ImportError> {
    let mut batch = read_grades(File::open(&cli.file)?)?;
    info!(
        "Read {} grade rows from {}",
        batch.rows.len() + batch.rejected.len(),
        cli.file.display()
    );

    let db = create_connection(&DatabaseConfig::from_env()?).await?;
    let summary = GradeService::import_grades(&db, mem::take(&mut batch.rows)).await?;

    log_summary("grades", &batch.reconcile(summary));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
