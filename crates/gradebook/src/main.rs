//! `gradebook` - CLI for the course gradebook
//!
//! Runs the interactive menu by default, or prints the course list, GPA
//! summary, or configuration and exits.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use gradebook::cli::{Cli, Command, ConfigCommand};
use gradebook::report::{write_course_table, write_summary, write_summary_json};
use gradebook::{init_logging, Config, Error, Gradebook, Session, Store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let command = cli.command.unwrap_or(Command::Menu);

    // Load configuration
    let config = if command.needs_config() {
        Config::load_from(cli.config.clone())?
    } else {
        Config::default()
    };
    let data_path = cli.data.clone().unwrap_or_else(|| config.data_path());

    match command {
        Command::Menu => handle_menu(&config, data_path),
        Command::List(list_cmd) => handle_list(data_path, list_cmd.json),
        Command::Summary(summary_cmd) => handle_summary(&config, data_path, summary_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, cli.config, config_cmd),
    }
}

fn load_gradebook(data_path: PathBuf) -> Result<(Store, Gradebook), Error> {
    let store = Store::new(data_path);
    let gradebook = Gradebook::from_state(store.load()?);
    Ok((store, gradebook))
}

fn handle_menu(config: &Config, data_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let (store, gradebook) = load_gradebook(data_path)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(
        gradebook,
        store,
        config.display.clone(),
        stdin.lock(),
        stdout.lock(),
    )
    .run()?;
    Ok(())
}

fn handle_list(data_path: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, gradebook) = load_gradebook(data_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(gradebook.state())?);
    } else {
        write_course_table(&mut io::stdout().lock(), &gradebook)?;
    }
    Ok(())
}

fn handle_summary(
    config: &Config,
    data_path: PathBuf,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, gradebook) = load_gradebook(data_path)?;

    let summary = match gradebook.gpa_summary() {
        Ok(summary) => Some(summary),
        Err(Error::EmptyGradebook) => None,
        Err(e) => return Err(e.into()),
    };

    let mut out = io::stdout().lock();
    match (summary, json) {
        (summary, true) => write_summary_json(&mut out, summary.as_ref())?,
        (Some(summary), false) => write_summary(&mut out, &summary, config.display.decimals)?,
        (None, false) => writeln!(out, "No courses available.")?,
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!();
                println!("[Display]");
                println!("  Clear screen:       {}", config.display.clear_screen);
                println!(
                    "  Pause after action: {}",
                    config.display.pause_after_action
                );
                println!("  Decimals:           {}", config.display.decimals);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
