//! `satconfig [--random] [KCONFIG_FILE] [SATCONFIG_FILE]` (`spec.md` §6).
//!
//! Parses the configuration language, overlays the `.satconfig` preference file,
//! drives the constraint compiler to a solved symbol table, and writes back
//! `.config` and the generated autoconf header. Exit `0` on success; exit `1` with a
//! single `error: ...` line on stderr on any fatal failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, Command};
use log::info;

use satconfig_core::Driver;
use satconfig_kconfig::{conf_read_simple, conf_write, conf_write_autoconf, parse, DefSlot};

fn cli() -> Command {
    Command::new("satconfig")
        .about("Solves a kernel-style configuration with an external SAT engine")
        .arg(
            Arg::new("random")
                .long("random")
                .num_args(0)
                .help("Seed the solver from the system clock and use random phases."),
        )
        .arg(
            Arg::new("kconfig_file")
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("The Kconfig-like source file (default: Kconfig)."),
        )
        .arg(
            Arg::new("satconfig_file")
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("The user preference overlay (default: .satconfig)."),
        )
}

fn run() -> Result<(), String> {
    let matches = cli().get_matches();

    let random = matches.get_flag("random");
    let kconfig_path = matches
        .get_one::<PathBuf>("kconfig_file")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("Kconfig"));
    let satconfig_path = matches
        .get_one::<PathBuf>("satconfig_file")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(".satconfig"));

    let source = std::fs::read_to_string(&kconfig_path)
        .map_err(|e| format!("could not read {}: {e}", kconfig_path.display()))?;

    let mut table = parse(&kconfig_path.to_string_lossy(), &source).map_err(|e| e.to_string())?;
    info!("parsed {} symbols from {}", table.len(), kconfig_path.display());

    conf_read_simple(&mut table, &satconfig_path, DefSlot::Sat).map_err(|e| e.to_string())?;

    let mut driver = Driver::new(table, random);
    driver.run().map_err(|e| e.to_string())?;

    let table = driver.into_table();
    conf_write(&table, std::path::Path::new(".config")).map_err(|e| e.to_string())?;
    conf_write_autoconf(&table, std::path::Path::new("autoconf.h")).map_err(|e| e.to_string())?;

    info!("wrote .config and autoconf.h");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
