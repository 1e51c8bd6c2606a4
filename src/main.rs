use clap::{Parser, ValueEnum};
use env_logger::Env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod gui;

use evolveed::cli::{CliSession, Step};
use evolveed::session::{FileSessionStore, MemorySessionStore, SessionRepository};
use evolveed::settings::{
    default_base_path, ensure_base_folders, load_or_init_settings, save_settings, Settings,
};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "evolveed",
    version,
    about = "EvolveEd portal: institutions, role dashboards and student records"
)]
struct CliArgs {
    /// Choose GUI (default) or CLI mode
    #[arg(long, value_enum, default_value = "gui")]
    mode: RunMode,
    /// Override data base path (defaults to ./data next to the exe)
    #[arg(long)]
    base_path: Option<PathBuf>,
    /// Keep the signed-in session in memory only
    #[arg(long)]
    ephemeral_session: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RunMode {
    Gui,
    Cli,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let args = CliArgs::parse();
    let base_path = args.base_path.unwrap_or_else(default_base_path);

    if let Err(e) = ensure_base_folders(&base_path) {
        error!(
            "Failed to create base folders at {}: {}",
            base_path.display(),
            e
        );
        return;
    }

    let mut settings = match load_or_init_settings(&base_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return;
        }
    };

    info!("Using data path: {}", base_path.display());

    settings.base_path = base_path.to_string_lossy().to_string();
    settings.mode = match args.mode {
        RunMode::Gui => "gui".to_string(),
        RunMode::Cli => "cli".to_string(),
    };

    let store: Box<dyn SessionRepository> = if args.ephemeral_session {
        Box::new(MemorySessionStore::new())
    } else {
        Box::new(FileSessionStore::new(&base_path))
    };

    match args.mode {
        RunMode::Gui => {
            if let Err(e) = gui::launch_gui(base_path.clone(), settings.clone(), store) {
                error!("Failed to start GUI: {}", e);
            }
            // the GUI saves its own copy as it goes
            match load_or_init_settings(&base_path) {
                Ok(saved) => settings = saved,
                Err(e) => error!("Could not re-read settings: {}", e),
            }
        }
        RunMode::Cli => {
            run_cli(&mut settings, &base_path, store);
        }
    }

    if let Err(e) = save_settings(&settings, &base_path) {
        error!("Could not save settings: {}", e);
    }
}

fn run_cli(settings: &mut Settings, base_path: &Path, store: Box<dyn SessionRepository>) {
    println!("EvolveEd CLI starting up");
    println!("Base path: {}", base_path.display());
    println!("Type 'help' for commands, 'exit' to quit.\n");

    let mut session = CliSession::new(store, settings);

    loop {
        print!("{}", session.prompt());
        if let Err(e) = io::stdout().flush() {
            error!("Could not flush stdout: {e}");
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Exiting.");
                break;
            }
        }

        match session.execute(&input) {
            Step::Continue(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Step::Exit => {
                println!("Goodbye");
                break;
            }
        }
    }

    session.store_preferences(settings);
}
