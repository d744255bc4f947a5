use clap::Parser;
use database::{
    config::DatabaseConfig, db::create_connection, services::schedule::ScheduleService,
};
use importer::{error::ImportError, rows::read_schedules, util::log_summary};
use log::{error, info};
use std::{fs::File, mem, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(
    name = "import-schedules",
    version,
    about = "Book class meetings from a CSV file, skipping room conflicts"
)]
struct Cli {
    /// CSV with columns course_id,lecturer_id,class_name,day,start,end,room
    #[arg(long, short = 'f')]
    file: PathBuf,
}

async fn run(cli: Cli) -> Result<(), ImportError> {
    let mut batch = read_schedules(File::open(&cli.file)?)?;
    info!(
        "Read {} schedule rows from {}",
        batch.rows.len() + batch.rejected.len(),
        cli.file.display()
    );

    let db = create_connection(&DatabaseConfig::from_env()?).await?;
    let summary = ScheduleService::import_schedules(&db, mem::take(&mut batch.rows)).await?;

    log_summary("schedules", &batch.reconcile(summary));
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
