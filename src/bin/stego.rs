//! # Stego Binary Entry Point
//!
//! Command-line front end for hiding text in images and reading it back.
//!
//! ## Usage
//!
//! ```bash
//! stego hide photo.png "meet at noon" -p hunter2 -o out.png
//! stego show out.png -p hunter2
//! stego capacity photo.png --json
//! stego              # interactive prompt
//! ```
//!
//! Passwords that are not given with `-p` are asked for on stdin.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use pixel_stego::common::config::{load_config, StegoConfig};
use pixel_stego::common::logging::init_logger;
use pixel_stego::processing::steganography;
use pixel_stego::Carrier;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at DEBUG level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message inside an image
    Hide {
        /// Carrier image
        image: PathBuf,

        /// Text to hide
        message: String,

        /// Output PNG (defaults to the input name plus the configured suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Reveal the message hidden in an image
    Show {
        image: PathBuf,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Report how much text an image can carry
    Capacity {
        image: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for actions on stdin until told to quit
    Interactive,
}

#[derive(Debug, Serialize)]
struct CapacityReport {
    width: u32,
    height: u32,
    capacity_bits: usize,
    max_message_bytes: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config: StegoConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logger(level);

    match args.command.unwrap_or(Command::Interactive) {
        Command::Hide {
            image,
            message,
            output,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let output = output.unwrap_or_else(|| config.output.output_path_for(&image));
            hide(&image, &message, &password, &output)
        }
        Command::Show { image, password } => {
            let password = password_or_prompt(password)?;
            let message = show(&image, &password)?;
            println!("{}", message);
            Ok(())
        }
        Command::Capacity { image, json } => capacity(&image, json),
        Command::Interactive => interactive(&config),
    }
}

fn hide(image: &Path, message: &str, password: &str, output: &Path) -> Result<()> {
    let mut carrier = Carrier::open(image)?;
    steganography::hide(carrier.grid_mut(), message, password)?;
    carrier.save(output)?;

    info!(
        "Hid {} bytes in {} -> {}",
        message.len(),
        image.display(),
        output.display()
    );
    Ok(())
}

fn show(image: &Path, password: &str) -> Result<String> {
    let carrier = Carrier::open(image)?;
    let message = steganography::reveal(carrier.grid(), password)?;

    info!("Recovered {} bytes from {}", message.len(), image.display());
    Ok(message)
}

fn capacity(image: &Path, json: bool) -> Result<()> {
    let carrier = Carrier::open(image)?;
    let grid = carrier.grid();

    let report = CapacityReport {
        width: grid.width(),
        height: grid.height(),
        capacity_bits: steganography::capacity(grid),
        max_message_bytes: steganography::max_message_len(grid),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}x{}: {} bits, up to {} message bytes",
            report.width,
            report.height,
            report.capacity_bits,
            report.max_message_bytes.unwrap_or(0)
        );
    }
    Ok(())
}

fn interactive(config: &StegoConfig) -> Result<()> {
    loop {
        let action = prompt("Hide or show a message? [hide/show/quit]: ")?;

        let result = match action.to_lowercase().as_str() {
            "hide" | "h" => interactive_hide(config),
            "show" | "s" => interactive_show(),
            "quit" | "q" | "exit" | "" => break,
            other => {
                println!("Unknown action '{}'", other);
                continue;
            }
        };

        if let Err(e) = result {
            error!("{}", e);
        }
    }

    Ok(())
}

fn interactive_hide(config: &StegoConfig) -> Result<()> {
    let image = PathBuf::from(prompt("Image path: ")?);
    let message = prompt("Message: ")?;
    let password = password_or_prompt(None)?;

    let default_output = config.output.output_path_for(&image);
    let output = prompt(&format!("Output path [{}]: ", default_output.display()))?;
    let output = if output.is_empty() {
        default_output
    } else {
        PathBuf::from(output)
    };

    hide(&image, &message, &password, &output)?;
    println!("Saved {}", output.display());
    Ok(())
}

fn interactive_show() -> Result<()> {
    let image = PathBuf::from(prompt("Image path: ")?);
    let password = password_or_prompt(None)?;

    println!("{}", show(&image, &password)?);
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}

/// Print `label` and read one line from stdin, without the trailing newline.
/// Returns an empty string at end of input.
fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
