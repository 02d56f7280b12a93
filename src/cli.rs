use std::path::{Path, PathBuf};
use structopt::StructOpt;

use crate::compiler::{compile_file, default_output_path};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::publish::{Publisher, ResourceUrl};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "problemset",
    about = "compile homework-style LaTeX problem sets into self-contained HTML",
)]
enum Cli {
    /// Convert a problem set to a single HTML document.
    Compile {
        #[structopt(parse(from_os_str))]
        source: PathBuf,
        /// Defaults to the source path with an `html` extension.
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
        #[structopt(short, long, parse(from_os_str))]
        config: Option<PathBuf>,
    },
    /// Replace an assignment's description with a compiled document.
    Publish {
        #[structopt(parse(from_os_str))]
        html_file: PathBuf,
        /// e.g. https://example.instructure.com/courses/1/assignments/2
        url: String,
        /// Fetch the assignment but do not update it.
        #[structopt(long)]
        dry_run: bool,
        #[structopt(short, long, parse(from_os_str))]
        config: Option<PathBuf>,
    },
}

pub fn run_cli() -> Result<()> {
    match Cli::from_args() {
        Cli::Compile {source, output, config} => {
            let config = Config::load_or_default(config.as_deref())?;
            let output_path = output.unwrap_or_else(|| default_output_path(&source));
            let html = compile_file(&source, &config)?;
            write_output(&output_path, &html)?;
            println!("Wrote {}", output_path.display());
        }
        Cli::Publish {html_file, url, dry_run, config} => {
            let config = Config::load_or_default(config.as_deref())?;
            let target = ResourceUrl::parse(&url)?;
            let publisher = Publisher::from_config(&config)?;
            let html = std::fs::read_to_string(&html_file).map_err(|source| Error::Read {
                path: html_file.clone(),
                source,
            })?;
            let report = publisher.publish(&html, &target, dry_run)?;
            println!("Target: {}", target);
            println!("Assignment: {}", report.name.as_deref().unwrap_or("(no name)"));
            if report.used_body {
                println!("Using <body> contents only.");
            }
            println!("Replacing description with {} characters from {}", report.length, html_file.display());
            match report.updated_length {
                Some(length) => {
                    println!("Update successful.");
                    println!("Updated description length: {}", length);
                }
                None => println!("Dry run: not updating."),
            }
        }
    }
    Ok(())
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: path.to_owned(),
            source,
        })?;
    }
    std::fs::write(path, html).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })
}
