// src/bin/pathvis.rs
use colored::Colorize;
use std::process;

fn main() {
    if let Err(e) = pathvis_core::cli::run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}
