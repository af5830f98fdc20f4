// Command-line front end for the identity document extractor
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use log::{error, info, LevelFilter};

use kensho::{DocumentExtractor, DocumentType, ExtractionError, ExtractorConfig, OcrLine};

#[derive(Parser)]
#[command(name = "kensho")]
#[command(about = "Classify Japanese identity document OCR text and extract its fields")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract fields and print them as JSON
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Skip classification and read the text as this layout
        #[arg(short, long)]
        document_type: Option<DocumentType>,

        /// Input is a JSON array of OCR lines instead of plain text
        #[arg(long)]
        ocr_json: bool,

        #[arg(long)]
        pretty: bool,
    },
    /// Print the detected document type
    Classify {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file; stdin when omitted
    file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn extractor(&self) -> Result<DocumentExtractor, ExtractionError> {
        let config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)?,
            None => ExtractorConfig::default(),
        };
        DocumentExtractor::new(config)
    }

    fn read(&self) -> Result<String, ExtractionError> {
        match &self.file {
            Some(path) => read_file(path),
            None => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, ExtractionError> {
    info!("Reading {}", path.display());
    Ok(fs::read_to_string(path)?)
}

fn run(cli: Cli) -> Result<(), ExtractionError> {
    match cli.command {
        Command::Extract {
            input,
            document_type,
            ocr_json,
            pretty,
        } => {
            let extractor = input.extractor()?;
            let raw = input.read()?;
            let result = if ocr_json {
                let lines: Vec<OcrLine> = serde_json::from_str(&raw)?;
                extractor.extract_ocr_lines(&lines, document_type)
            } else {
                extractor.extract(&raw, document_type)
            };

            let output = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{}", output);
        }
        Command::Classify { input } => {
            let extractor = input.extractor()?;
            let raw = input.read()?;
            println!("{}", extractor.classify(&raw));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
