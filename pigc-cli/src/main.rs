use std::io;
use std::path::PathBuf;
use std::process::{self, Command};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use pigc::{EventSink, InputBank, KeymapConfig, UinputSink, run};

/// Turn GPIO arcade buttons into a virtual keyboard
#[derive(Parser, Debug)]
#[command(name = "pigc", version, about)]
struct Cli {
    /// Do not fork and disassociate from the tty
    #[arg(short, long)]
    foreground: bool,

    /// Show key events on stderr
    #[arg(short, long)]
    debug: bool,

    /// Shut the system down when the shutdown combo is pressed
    #[arg(short, long)]
    shutdown: bool,

    /// Keymap file replacing the built-in pin table
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if let Err(e) = start(&cli) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn init_logger(debug: bool) {
    env_logger::builder()
        .filter_level(if debug { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();
}

/// Everything acquired here is released on the way out, the bank unexports
/// its lines when dropped.
fn start(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => KeymapConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => KeymapConfig::default(),
    };

    let mut bank = InputBank::open_sysfs(&config).context("initializing gpio lines")?;
    if cli.shutdown {
        let [first, second] = config.shutdown;
        bank.set_shutdown_combo(first, second, power_off)
            .context("installing shutdown combo")?;
    }

    let mut sink = UinputSink::new();
    bank.map_keys(|key| sink.register_key(key))
        .context("registering keys")?;
    sink.create().context("creating uinput device")?;

    if !cli.foreground {
        daemonize().context("daemon")?;
    }

    info!("Forwarding {} buttons", bank.len());
    match run(&mut bank, &mut sink)? {}
}

fn power_off() {
    info!("Shutting down the system");
    match Command::new("/sbin/shutdown").args(["-h", "now"]).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("shutdown exited with {status}"),
        Err(e) => warn!("cannot run shutdown: {e}"),
    }
}

fn daemonize() -> io::Result<()> {
    // SAFETY: no other thread exists yet, forking here is sound.
    if unsafe { libc::daemon(0, 0) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
