//! Process entry point: initializes logging, loads configuration, opens the
//! real X11 backend, and runs the event loop until QUIT or disconnect. A
//! fatal startup error is printed as `Error: <msg>` and exits 1.

use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::WriteStyle::Auto;
use log::info;

use rswm::backend::xlib::XlibBackend;
use rswm::config::Config;
use rswm::WindowManager;

/// `$XDG_CONFIG_HOME/rswm/config.toml`, falling back to `~/.config` if
/// `XDG_CONFIG_HOME` isn't set — a missing file just means defaults.
fn config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("rswm").join("config.toml")
}

fn run() -> Result<(), rswm::WmError> {
    let config = Config::load(&config_path())?;
    let backend = XlibBackend::new();
    let mut manager = WindowManager::new(backend, config)?;
    info!("rswm started");
    manager.run();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::builder()
        .format_timestamp(None)
        .write_style(Auto)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
