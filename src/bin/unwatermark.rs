use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use unwatermark::{is_supported_image, pipeline, Job, WatermarkEngine};

#[derive(Parser)]
#[command(
    name = "unwatermark",
    about = "Remove the fixed bottom-right logo watermark from images",
    version,
    after_help = "Supported inputs: png, jpg, jpeg, webp. PNG inputs are written\n\
                  as PNG; everything else is written as JPEG at quality 95."
)]
struct Cli {
    /// Input image file or directory (directories are walked recursively)
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Number of concurrent workers (0 = all CPU cores)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.input.exists() {
        eprintln!("Error: input path does not exist: {}", cli.input.display());
        process::exit(1);
    }

    let files = collect_files(&cli.input);
    if files.is_empty() {
        println!("No supported images found (png, jpg, jpeg, webp).");
        return;
    }

    if let Err(e) = std::fs::create_dir_all(&cli.output) {
        eprintln!("Error creating output directory: {e}");
        process::exit(1);
    }

    let engine = match WatermarkEngine::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Fatal: failed to initialize engine: {e}");
            process::exit(1);
        }
    };

    let jobs: Vec<Job> = files
        .iter()
        .map(|input| {
            let name = input.file_name().unwrap_or_default();
            Job::new(input, cli.output.join(name))
        })
        .collect();

    println!(
        "Found {} images. Processing with {} workers...",
        jobs.len(),
        if cli.workers == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            cli.workers
        }
    );

    let start = Instant::now();
    let results = match pipeline::run(&engine, &jobs, cli.workers) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Fatal: {e}");
            process::exit(1);
        }
    };

    for result in &results {
        let name = result.input.file_name().map_or_else(
            || result.input.display().to_string(),
            |f| f.to_string_lossy().to_string(),
        );
        match &result.outcome {
            Ok(label) => {
                if cli.verbose {
                    println!("{label}");
                }
            }
            Err(e) => eprintln!("Error processing {name}: {e}"),
        }
    }

    let summary = pipeline::summarize(&results);
    println!(
        "Processed {}/{} images in {:.2}s",
        summary.succeeded,
        summary.attempted,
        start.elapsed().as_secs_f64()
    );
    println!("Output saved to: {}", cli.output.display());

    if summary.failed > 0 {
        process::exit(1);
    }
}

/// Collect input files: a single file as-is, a directory walked recursively
/// keeping only supported image extensions.
fn collect_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }

    WalkDir::new(input)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_supported_image(p))
        .collect()
}
