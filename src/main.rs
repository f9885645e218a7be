use clap::{Parser, Subcommand};
use anyhow::Result;
use easy_reader::parser::{EasyParser, FileParser};
use easy_reader::ReaderOptions;
use polars::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "easy_reader_cli")]
#[command(about = "A CLI tool for reading Enobio .easy EEG recordings")]
struct Cli {
    #[arg(long, global = true, help = "JSON reader options")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Electrode layout to resolve channel positions against")]
    layout: Option<String>,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More logging")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Parse {
        #[arg(help = ".easy file to read")]
        path: PathBuf,
    },
    Dataset {
        #[arg(help = "Directory containing .easy/.info pairs")]
        dir: PathBuf,
        #[arg(long, help = "Output CSV file")]
        output: Option<PathBuf>,
    },
    Stats {
        #[arg(help = "Dataset CSV file")]
        dataset: PathBuf,
    },
    /// Print the effective reader options as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut options = match &cli.config {
        Some(path) => ReaderOptions::load(path)?,
        None => ReaderOptions::default(),
    };
    if cli.layout.is_some() {
        options.layout = cli.layout.clone();
    }

    match cli.command {
        Commands::Parse { path } => {
            println!("Parsing: {}", path.display());
            let parser = EasyParser::with_options(&path, &options, None)?;
            let rec = &parser.recording;
            for warning in &rec.warnings {
                log::warn!("{}", warning);
            }
            println!("Result: {} channels, {} samples", rec.n_channels(), rec.n_samples());
            println!("Sample rate: {} Hz ({:.2} s)", parser.sample_rate(), rec.duration_s());
            if let Some(start) = rec.descriptor.start_time() {
                println!("Start: {} s since epoch", start);
            }
            // for each channel print kind and first value
            for (idx, (name, kind)) in rec
                .descriptor
                .channel_names()
                .iter()
                .zip(rec.descriptor.channel_kinds())
                .enumerate()
            {
                let first = rec.data.row(idx).first().copied();
                println!("{} [{}]: {:?}", name, kind.as_str(), first);
            }
            println!("Events: {}", rec.events().len());
        }

        Commands::Dataset { dir, output } => {
            println!("Building dataset from directory: {}", dir.display());
            let mut dataset = FileParser::parse_directory(&dir, &options)?.collect()?;

            println!("Dataset shape: {:?}", dataset.shape());

            if let Some(output_path) = output {
                let mut file = std::fs::File::create(&output_path)?;
                CsvWriter::new(&mut file).finish(&mut dataset)?;
                println!("Saved dataset to: {}", output_path.display());
            } else {
                println!("First 5 rows:");
                println!("{}", dataset.head(Some(5)));
            }
        }

        Commands::Stats { dataset } => {
            println!("Loading dataset: {}", dataset.display());
            let lf = LazyCsvReader::new(dataset).finish()?;
            let stats = lf.select([
                len().alias("recordings"),
                col("duration_s").sum().alias("total_duration_s"),
                col("num_events").sum().alias("total_events"),
                col("sample_rate_hz").n_unique().alias("unique_rates"),
                col("n_channels").max().alias("max_channels"),
            ]).collect()?;

            println!("Dataset statistics:");
            println!("{}", stats);
        }

        Commands::Config => {
            println!("{}", options.to_json()?);
        }
    }

    Ok(())
}
