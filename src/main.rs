use clap::{Parser, Subcommand};
use photomark::{config, output, pipeline};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photomark")]
#[command(about = "Stamp EXIF camera metadata watermarks onto photos")]
#[command(long_about = "\
Stamp EXIF camera metadata watermarks onto photos

Feed photomark one photo and it appends a white caption band below the
image: camera model and capture date on the left, exposure parameters on
the right, the manufacturer's mark in the center. The result is written
as a JPEG.

Pipeline:

  normalize    HEIC/HEIF is transcoded to JPEG (needs the `heif` build)
  extract      EXIF make/model/exposure -> the band contents
  layout       band height = max(8% of image height, 60px)
  compose      photo + band + text + brand mark on one canvas
  export       JPEG, quality 90, watermarked-image.jpg

A photo without any EXIF block is exported unmodified. Unknown camera
brands compose without a mark. Use --brand/--model to override what the
EXIF says (the manual mode), `photomark brands` for the brand table, and
`photomark gen-config` for a documented photomark.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to a photomark.toml (default: ./photomark.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite the caption band onto a photo and write the JPEG
    Mark {
        /// Input photo (JPEG, PNG, TIFF, WebP; HEIC with the heif build)
        file: PathBuf,
        /// Output path (default: watermarked-image.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Manual mode: replace the detected camera brand
        #[arg(long)]
        brand: Option<String>,
        /// Manual mode: replace the detected camera model
        #[arg(long)]
        model: Option<String>,
    },
    /// Show the metadata that would be printed on the band
    Inspect {
        /// Input photo
        file: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the fixed camera-brand table
    Brands,
    /// Print a stock photomark.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Mark {
            file,
            output: out_path,
            brand,
            model,
        } => {
            let opts = pipeline::MarkOptions {
                output: out_path,
                brand,
                model,
            };
            let outcome = pipeline::run_mark(&file, &config, &opts).map_err(user_facing)?;
            output::print_mark_report(&outcome);
        }
        Command::Inspect { file, json } => {
            let report = pipeline::run_inspect(&file).map_err(user_facing)?;
            if json {
                let rendered =
                    serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
                println!("{rendered}");
            } else {
                output::print_inspect_report(&report);
            }
        }
        Command::Brands => output::print_brand_table(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// All recoverable pipeline failures surface as one plain message; the
/// specific cause rides along underneath for anyone who wants it.
fn user_facing(err: pipeline::MarkError) -> String {
    format!("{}\n    cause: {err}", pipeline::USER_HINT)
}
