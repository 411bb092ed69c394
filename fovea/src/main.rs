use clap::Parser;
use fovea_core::context::ServiceContext;
use fovea_core::session::{self, SessionSettings};
use fovea_gui::{run_gui, GuiConfig};
use fovea_runtime::spawn_bus;
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(name = "fovea", version, about = "Fovea eye tracking service")]
struct Cli {
    /// Start with the control window hidden
    #[arg(long)]
    hide_ui: bool,
    /// Preferred port for the remote control interface
    #[arg(long, default_value_t = 50020)]
    port: u16,
    /// Directory holding the persisted session settings
    #[arg(long)]
    session_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let session_dir = cli.session_dir.clone().unwrap_or_else(default_session_dir);
    let session_file = session::session_file_path(&session_dir);

    let session = match session::load_session_file(&session_file) {
        Ok(session) => session,
        Err(err) => {
            log::info!("Using default session settings: {err}");
            SessionSettings::default()
        }
    };

    let context = Arc::new(ServiceContext::new(
        cli.port,
        cli.hide_ui,
        env!("CARGO_PKG_VERSION"),
    ));
    let (task, ui_rx) = match spawn_bus(context.clone(), session_file.clone()) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("Failed to start notification bus: {err}");
            process::exit(1);
        }
    };

    let snapshot = Arc::new(Mutex::new(session.clone()));
    run_gui(
        GuiConfig::default(),
        session,
        context.clone(),
        task.handle.clone(),
        ui_rx,
        snapshot.clone(),
    )?;

    // waits for the delay queue to drain, so a pending restart request has
    // been delivered by the time we look at the flag
    task.shutdown();

    if context.restart_requested() {
        // the settings were wiped before the start request fired; the fresh
        // instance comes up with defaults
        log::info!("Restarting with default settings");
        let exe = std::env::current_exe()?;
        let mut command = process::Command::new(exe);
        if cli.hide_ui {
            command.arg("--hide-ui");
        }
        command
            .arg("--port")
            .arg(cli.port.to_string())
            .arg("--session-dir")
            .arg(&session_dir);
        command.spawn()?;
        return Ok(());
    }

    let final_session = snapshot
        .lock()
        .map(|snapshot| snapshot.clone())
        .unwrap_or_default();
    if let Err(err) = session::save_session_file(&session_file, &final_session) {
        log::error!("Failed to persist session: {err}");
    }

    Ok(())
}

fn default_session_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".fovea"))
        .unwrap_or_else(|_| PathBuf::from(".fovea"))
}
