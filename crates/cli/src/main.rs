//! # exovet
//!
//! Command-line interface for training and querying the exoplanet classifier.

use clap::{Args, Parser, Subcommand};
use classifier_facade::{load_classifier, Classifier, Prediction, DEFAULT_MODEL_PATH};
use data_facade::{find_preset, FeatureVector, PRESETS, FEATURE_COLUMNS, FEATURE_COUNT};
use pipeline_facade::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = std::result::Result<T, String>;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str =
    "exovet=info,data_core=info,tuning_core=info,classifier_core=info,pipeline_core=info";

#[derive(Parser)]
#[command(name = "exovet")]
#[command(about = "Exoplanet candidate vetting: train and query the KOI classifier", long_about = None)]
struct Cli {
    /// Defaults to `train` with default settings
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the classifier and write the model artifact
    Train(TrainArgs),

    /// Classify one observation with a trained model
    Predict {
        /// Model artifact
        #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,

        /// Preset id (see `exovet presets`)
        #[arg(short, long, conflicts_with = "features", required_unless_present = "features")]
        preset: Option<String>,

        /// 11 comma-separated feature values in model order
        #[arg(short, long, allow_hyphen_values = true)]
        features: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in observation presets
    Presets,
}

#[derive(Args, Default)]
struct TrainArgs {
    /// Input KOI table
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output model artifact
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configurations sampled by the randomized search
    #[arg(long)]
    iterations: Option<usize>,

    /// Stratified cross-validation folds
    #[arg(long)]
    folds: Option<usize>,

    /// Seed for the split, the sampler and the booster
    #[arg(long)]
    seed: Option<u64>,

    /// Held-out fraction for the final evaluation
    #[arg(long)]
    test_ratio: Option<f64>,

    /// Worker threads for the search
    #[arg(long)]
    workers: Option<usize>,
}

impl TrainArgs {
    fn into_config(self) -> TrainingConfig {
        let mut config = TrainingConfig::default();
        if let Some(data) = self.data {
            config = config.with_data_path(data);
        }
        if let Some(output) = self.output {
            config = config.with_model_path(output);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(test_ratio) = self.test_ratio {
            config = config.with_test_ratio(test_ratio);
        }
        if let Some(n_iter) = self.iterations {
            config.search.n_iter = n_iter;
        }
        if let Some(folds) = self.folds {
            config.search.folds = folds;
        }
        if let Some(workers) = self.workers {
            config.search.workers = workers;
        }
        config
    }
}

#[derive(Serialize)]
struct PredictionOutput<'a> {
    source: &'a str,
    decision: &'static str,
    label: u8,
    probability: f64,
    confidence: f64,
}

/// Format a pipeline error with its category.
fn describe(error: &PipelineError) -> String {
    format!("[{}] {}", error.kind(), error)
}

fn run_train(args: TrainArgs) -> CliResult<()> {
    let config = args.into_config();
    info!(
        data = %config.dataset.path.display(),
        output = %config.model_path.display(),
        iterations = config.search.n_iter,
        folds = config.search.folds,
        workers = config.search.workers,
        "starting training"
    );

    let report = TrainingPipeline::new(config)
        .run()
        .map_err(|e| describe(&e))?;
    println!("{}", report);
    Ok(())
}

/// Parse `a,b,c,...` into a feature vector.
fn parse_features(raw: &str) -> CliResult<FeatureVector> {
    let values = raw
        .split(',')
        .map(|cell| {
            cell.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", cell.trim()))
        })
        .collect::<CliResult<Vec<f64>>>()?;
    if values.len() != FEATURE_COUNT {
        return Err(format!(
            "expected {} feature values ({}), got {}",
            FEATURE_COUNT,
            FEATURE_COLUMNS.join(", "),
            values.len()
        ));
    }
    FeatureVector::from_slice(&values).map_err(|e| e.to_string())
}

fn decision_text(prediction: &Prediction) -> &'static str {
    if prediction.is_confirmed() {
        "CONFIRMED EXOPLANET"
    } else {
        "FALSE POSITIVE"
    }
}

fn run_predict(
    model: PathBuf,
    preset: Option<String>,
    features: Option<String>,
    json: bool,
) -> CliResult<()> {
    let (source, vector) = match (preset, features) {
        (Some(id), _) => {
            let preset = find_preset(&id).ok_or_else(|| {
                let ids: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
                format!("Unknown preset '{}'. Available: {}", id, ids.join(", "))
            })?;
            (preset.name.to_string(), preset.features)
        }
        (None, Some(raw)) => ("manual".to_string(), parse_features(&raw)?),
        (None, None) => return Err("either --preset or --features is required".to_string()),
    };

    let classifier = load_classifier(&model).map_err(|e| format!("[{}] {}", e.kind(), e))?;
    let prediction = classifier
        .predict(&vector)
        .map_err(|e| format!("[{}] {}", e.kind(), e))?;

    if json {
        let output = PredictionOutput {
            source: &source,
            decision: decision_text(&prediction),
            label: prediction.label,
            probability: prediction.probability,
            confidence: prediction.confidence(),
        };
        let text = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        println!("Observation: {}", source);
        println!("Decision:    {} ({})", decision_text(&prediction), prediction.class_name());
        println!("Probability: {:.2}%", prediction.probability * 100.0);
        println!("Confidence:  {:.2}%", prediction.confidence() * 100.0);
    }
    Ok(())
}

fn run_presets() -> CliResult<()> {
    for preset in PRESETS.iter() {
        println!("{:<16} {}", preset.id, preset.name);
        for (column, value) in preset.features.named() {
            println!("    {:<14} {}", column, value);
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Train(TrainArgs::default())) {
        Commands::Train(args) => run_train(args),
        Commands::Predict {
            model,
            preset,
            features,
            json,
        } => run_predict(model, preset, features, json),
        Commands::Presets => run_presets(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
