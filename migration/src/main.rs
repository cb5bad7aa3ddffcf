use colored::*;
use std::{fs, path::Path, process::ExitCode};
use util::config::AppConfig;

mod runner;

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::global().clone();
    let db_file = config.sqlite_file();
    let url = config.database_url();
    let command = std::env::args().nth(1);

    match command.as_deref() {
        Some("clean") => {
            remove_db_file(db_file);
            return ExitCode::SUCCESS;
        }
        Some("fresh") => {
            remove_db_file(db_file);
        }
        Some("up") | None => {}
        Some(other) => {
            eprintln!("Unknown command '{}'. Expected one of: up, fresh, clean", other);
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = db_file {
        if let Err(err) = create_db_dir(path) {
            eprintln!("{} {}", "Failed to create DB directory:".red(), err);
            return ExitCode::FAILURE;
        }
    }

    match runner::run_pending_migrations(&url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Migration failed:".red(), err);
            ExitCode::FAILURE
        }
    }
}

fn remove_db_file(path: Option<&str>) {
    let Some(path) = path else {
        println!("DATABASE_PATH is a DSN; nothing to delete");
        return;
    };
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    match fs::remove_file(db_path) {
        Ok(()) => println!("Deleted DB: {}", db_path.display()),
        Err(err) => eprintln!("Failed to delete {}: {}", db_path.display(), err),
    }
}

fn create_db_dir(path: &str) -> std::io::Result<()> {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
