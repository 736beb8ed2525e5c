//! CLI module for qqwry-seek
//!
//! This module handles command line argument parsing and query logic.

pub mod format;

use crate::config::AppConfig;
use crate::database::GeoLookupService;
use crate::error::Result;
use clap::Parser;
use std::io::{self, BufRead, Read, Write};
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(name = "qqwry-seek")]
#[command(version, about = "Offline IPv4 geolocation lookups over a QQwry database")]
#[command(long_about = "qqwry-seek resolves IPv4 addresses to country/area text using a \
    local QQwry (纯真) database.\n\n\
    Queries come from arguments, a pipe, or an interactive prompt.\n\n\
    Examples:\n  \
    $ qqwry-seek 1.2.3.4\n  \
    $ echo \"Server IP: 8.8.8.8\" | qqwry-seek\n  \
    $ qqwry-seek --json 1.2.3.4\n  \
    $ qqwry-seek --db ./qqwry.dat 114.114.114.114")]
pub struct Cli {
    /// IPv4 addresses or text containing them (reads stdin when empty)
    #[arg(value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Database file (overrides config and QQWRY_SEEK_DB)
    #[arg(short, long, value_name = "PATH")]
    pub db: Option<String>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fold command line flags into the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ref db) = self.db {
            config.database.path = Some(db.clone());
        }
        if self.json {
            config.output.json = true;
        }
        if self.no_color {
            config.output.enable_colors = false;
        }
        if self.verbose {
            config.global.verbose = true;
        }
    }

    pub fn run(&self, config: AppConfig) -> Result<()> {
        let service = GeoLookupService::from_config(&config);
        if let Some(reason) = service.unavailable_reason() {
            eprintln!("Warning: {}", reason);
        }

        if !self.queries.is_empty() {
            self.process_queries_from_args(&service, &config)
        } else {
            self.process_queries_from_stdin(&service, &config)
        }
    }

    /// Process queries from command line arguments
    fn process_queries_from_args(&self, service: &GeoLookupService, config: &AppConfig) -> Result<()> {
        for query in &self.queries {
            if config.output.json {
                println!("{}", format::format_json(query, service)?);
            } else if query.parse::<Ipv4Addr>().is_ok() {
                println!("{}", format::format_compact(query, &service.address(query)));
            } else {
                println!(
                    "{}",
                    format::annotate_line(query, service, config.output.enable_colors)
                );
            }
        }
        Ok(())
    }

    /// Process queries from stdin (pipe or interactive mode)
    fn process_queries_from_stdin(&self, service: &GeoLookupService, config: &AppConfig) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        if atty::is(atty::Stream::Stdin) {
            println!("qqwry-seek interactive mode (type quit or Ctrl+D to exit)");

            for line in stdin.lock().lines() {
                let line = line?;
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }

                println!("{}", self.process_line(trimmed, service, config)?);
                stdout.flush()?;
            }
        } else {
            let mut buffer = String::new();
            stdin.lock().read_to_string(&mut buffer)?;

            for line in buffer.lines() {
                println!("{}", self.process_line(line, service, config)?);
            }
        }

        Ok(())
    }

    fn process_line(&self, line: &str, service: &GeoLookupService, config: &AppConfig) -> Result<String> {
        if config.output.json {
            Ok(format::format_json(line, service)?)
        } else {
            Ok(format::annotate_line(line, service, config.output.enable_colors))
        }
    }
}
