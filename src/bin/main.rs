use clap::Parser;
use order_insights::config::Vocabulary;
use order_insights::dataset::DatasetLoader;
use order_insights::engine::{analyze, AssemblerConfig};
use order_insights::errors::InsightError;
use order_insights::ops::telemetry;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "order-insights")]
#[command(about = "Keyword, attribute and sales insights from an order export")]
#[command(version)]
struct Args {
    /// Order export as a JSON array of row objects
    input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Rank additional keywords over the whole corpus instead of per category
    #[arg(long)]
    no_stratify: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init_tracing_with_level(&args.log_level);

    tracing::info!(input = %args.input.display(), "Order insights starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), InsightError> {
    let raw = tokio::fs::read_to_string(&args.input).await?;
    let config = AssemblerConfig {
        stratify_tfidf: !args.no_stratify,
        ..AssemblerConfig::default()
    };
    let pretty = args.pretty;

    // * The core is synchronous; run it on one blocking worker
    let rendered = tokio::task::spawn_blocking(move || -> Result<String, InsightError> {
        let vocabulary = Vocabulary::from_env();
        let (dataset, _stats) = DatasetLoader::new(&vocabulary).load_str(&raw)?;
        let report = analyze(&dataset, &vocabulary, config);
        if pretty {
            report.to_json_pretty()
        } else {
            report.to_json()
        }
    })
    .await
    .map_err(|e| InsightError::InvalidInput(format!("analysis worker stopped: {}", e)))??;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered.as_bytes()).await?;
            tracing::info!(output = %path.display(), bytes = rendered.len(), "Report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
