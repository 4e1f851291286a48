//! Mengya headless shell.
//!
//! Reads line commands from stdin and drives a navigation session over a
//! file-backed store. Type `help` for the command list. The config path comes
//! from the first argument or `MENGYA_CONFIG`; without one the defaults are
//! used.

mod commands;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use commands::Outcome;
use mengya_nav::{MemoryHost, Session};
use mengya_store::FileStorage;
use mengya_types::clock::SystemClock;
use mengya_types::config::MengyaConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MENGYA_CONFIG").ok())
    {
        Some(path) => MengyaConfig::load(&PathBuf::from(path))?,
        None => MengyaConfig::default(),
    };
    log::info!(
        "Starting Mengya shell (namespace {}, store {})",
        config.namespace,
        config.storage_path.display(),
    );

    let storage = FileStorage::open(&config.storage_path)?;
    let host = MemoryHost::new(&format!("/{}.html", config.home_page));
    let mut session = Session::new(config, host, Box::new(storage), Box::new(SystemClock));
    session.page_ready();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print_prompt(&mut stdout, &session)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let result = commands::parse(&line).and_then(|cmd| match cmd {
            Some(cmd) => commands::execute(cmd, &mut session),
            None => Ok(Outcome::Lines(Vec::new())),
        });
        for alert in commands::drain_alerts(&mut session) {
            writeln!(stdout, "! {alert}")?;
        }
        match result {
            Ok(Outcome::Lines(lines)) => {
                for l in lines {
                    writeln!(stdout, "{l}")?;
                }
            },
            Ok(Outcome::Quit) => break,
            Err(e) => writeln!(stdout, "error: {e:#}")?,
        }
        print_prompt(&mut stdout, &session)?;
    }

    let report = session.before_unload();
    log::info!(
        "Flushed store: {} written, {} expired",
        report.written,
        report.expired
    );
    Ok(())
}

fn print_prompt(out: &mut impl Write, session: &Session<MemoryHost>) -> Result<()> {
    write!(out, "{}> ", session.current_page())?;
    out.flush()?;
    Ok(())
}
