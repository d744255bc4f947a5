use clap::Parser;
use database::{
    config::DatabaseConfig,
    db::create_connection,
    services::grade::{GradeFilter, GradeService},
};
use importer::{
    error::ImportError,
    rows::write_grades,
    util::{DEFAULT_OUTPUT_DIR, create_csv_writer},
};
use log::{error, info};
use models::term::{AcademicYear, Semester};
use std::process::ExitCode;

/// Output file name
const OUTPUT_FILE: &str = "grades.csv";

/// Rows fetched per query
const PAGE_SIZE: u64 = 500;

#[derive(Parser, Debug)]
#[command(name = "export-grades", version, about = "Export recorded grades to CSV")]
struct Cli {
    /// Directory to write grades.csv into
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_DIR)]
    output: String,

    /// Only export this academic year, e.g. 2024 or 2024/2025
    #[arg(long)]
    academic_year: Option<AcademicYear>,

    /// Only export this semester (odd, even or short)
    #[arg(long)]
    semester: Option<Semester>,
}

async fn run(cli: Cli) -> Result<(), ImportError> {
    let db = create_connection(&DatabaseConfig::from_env()?).await?;
    let mut writer = create_csv_writer(&cli.output, OUTPUT_FILE)?;

    let filter = GradeFilter {
        academic_year: cli.academic_year,
        semester: cli.semester,
        ..Default::default()
    };

    let mut page = 1;
    let mut exported = 0;
    loop {
        let (grades, _) =
            GradeService::list_grades(&db, filter.clone(), page, PAGE_SIZE).await?;
        write_grades(&mut writer, &grades)?;
        exported += grades.len();

        if (grades.len() as u64) < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    info!("Exported {exported} grades to {}/{OUTPUT_FILE}", cli.output);
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
