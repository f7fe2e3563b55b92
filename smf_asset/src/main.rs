use anyhow::{bail, Result};
use log::{debug, error, warn};
use smf_asset::mesh::obj;
use smf_format::Format;
use std::{fs, io, path::Path};
use structopt::StructOpt;
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "smf_asset")]
struct CliArgs {
    /// Specify the input `.obj` file or a folder to search for them
    input: String,
    /// Output directory, to place the converted files in
    #[structopt(short = "o", long = "output")]
    output: String,
    /// Output format: `text` or `binary`, unless overridden by a meta file
    #[structopt(short = "f", long = "format", default_value = "text")]
    format: Format,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input path does not exist: {0}")]
    InputNonExistant(String),
    #[error("Output folder structure could not be created: {0}")]
    ErrorCreatingOutputStructure(#[from] io::Error),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    prepare(args)
}

fn prepare(args: CliArgs) -> Result<()> {
    let output_path = Path::new(&args.output);

    let input_path = Path::new(&args.input);
    if !input_path.exists() {
        return Err(CliError::InputNonExistant(input_path.display().to_string()).into());
    }

    let mut converted = 0;
    let mut failed = 0;

    for entry in WalkDir::new(input_path) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        // mirror the input folder structure in the output folder
        let relative = if input_path.is_file() {
            Path::new("")
        } else {
            path.strip_prefix(input_path)?
                .parent()
                .unwrap_or_else(|| Path::new(""))
        };
        let local_output_folder = output_path.join(relative);

        // check extension
        if let Some(Some(extension)) = path.extension().map(|x| x.to_str()) {
            match extension.to_ascii_lowercase().as_ref() {
                "obj" => {
                    if !local_output_folder.exists() {
                        fs::create_dir_all(&local_output_folder)
                            .map_err(CliError::ErrorCreatingOutputStructure)?;
                    }

                    match obj::process(path, &local_output_folder, args.format) {
                        Ok(_) => converted += 1,
                        Err(err) => {
                            error!("Could not convert `{}`: {:#}", path.display(), err);
                            failed += 1;
                        }
                    }
                }
                "toml" => debug!("Ignored toml file: {}", &path.display()),
                _ => warn!("Could not handle path: {}", &path.display()),
            }
        } else {
            warn!(
                "Ignored file \"{}\", because no file extension was found.",
                path.display()
            );
        }
    }

    if failed > 0 {
        bail!("{} of {} models failed to convert", failed, failed + converted);
    }

    Ok(())
}
