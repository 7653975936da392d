//! Command-line interface argument parsing
//!
//! Defines all CLI commands and their arguments using Clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mldash - drive the ML dashboard backend from the terminal
#[derive(Parser, Debug)]
#[command(name = "mldash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload datasets, train models, run AutoML and fetch reports from the ML dashboard backend")]
#[command(long_about = concat!(
    "mldash (v", env!("CARGO_PKG_VERSION"), ")\n",
    "Command-line client for the ML dashboard backend.\n\n",
    "Load or upload datasets (data), train and evaluate models (ml, stacking, automl),\n",
    "render charts (viz) and manage reports and model artifacts (reports, models)."
))]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides the config file and MLDASH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the backend is reachable
    ///
    /// Example:
    ///   mldash health
    #[command(display_order = 1)]
    Health,

    /// Show what the backend currently holds (datasets, models, history)
    ///
    /// Example:
    ///   mldash status
    #[command(display_order = 2)]
    Status,

    /// Dataset operations
    #[command(subcommand, display_order = 3)]
    Data(DataCommand),

    /// Single-model training, prediction and evaluation
    #[command(subcommand, display_order = 4)]
    Ml(MlCommand),

    /// Stacking ensembles
    #[command(subcommand, display_order = 5)]
    Stacking(StackingCommand),

    /// Run an AutoML search
    ///
    /// Examples:
    ///   mldash automl --target yield_strength --search-method random --max-iter 30
    ///   mldash automl --model rf --model xgb --training-mode thorough
    #[command(display_order = 6)]
    Automl(AutoMlArgs),

    /// Chart generation
    #[command(subcommand, display_order = 7)]
    Viz(VizCommand),

    /// Analysis reports
    #[command(subcommand, display_order = 8)]
    Reports(ReportsCommand),

    /// Stored model artifacts
    #[command(subcommand, display_order = 9)]
    Models(ModelsCommand),

    /// Print the dashboard route table
    #[command(display_order = 10)]
    Routes {
        /// Include hidden routes and redirects
        #[arg(long)]
        all: bool,
    },

    /// Inspect or create the config file
    #[command(subcommand, display_order = 11)]
    Config(ConfigCommand),

    /// Check CLI version
    #[command(display_order = 12)]
    Version,
}

/// `mldash data ...`
#[derive(Subcommand, Debug)]
pub enum DataCommand {
    /// Load the backend's bundled default datasets
    LoadDefault,

    /// Upload a training and/or test dataset (CSV or spreadsheet)
    ///
    /// Example:
    ///   mldash data upload --train train.csv --test test.xlsx
    Upload {
        /// Training dataset
        #[arg(long)]
        train: Option<PathBuf>,

        /// Test dataset
        #[arg(long)]
        test: Option<PathBuf>,
    },

    /// Preview the loaded datasets
    Preview,

    /// Run preprocessing steps on the loaded datasets
    ///
    /// Example:
    ///   mldash data preprocess --method missing_values --fill-method mean
    Preprocess {
        /// Step to run (repeatable)
        #[arg(long = "method")]
        methods: Vec<String>,

        /// Missing-value fill method
        #[arg(long)]
        fill_method: Option<String>,

        /// Constant for the fixed-value fill
        #[arg(long)]
        fixed_value: Option<f64>,

        /// Outlier detection method
        #[arg(long)]
        outlier_method: Option<String>,

        #[command(flatten)]
        extra: ExtraParams,
    },

    /// Download a dataset
    ///
    /// Example:
    ///   mldash data download test csv -o ./exports
    Download {
        /// `train` or `test`
        data_type: String,

        /// File format (e.g. csv, xlsx)
        file_format: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// `mldash ml ...`
#[derive(Subcommand, Debug)]
pub enum MlCommand {
    /// List the available estimators
    Models,

    /// Train a model
    ///
    /// Example:
    ///   mldash ml train --model-type random_forest --target yield_strength --target elongation
    Train {
        /// Estimator key (see `mldash ml models`)
        #[arg(long, required = true)]
        model_type: String,

        /// Target column (repeatable)
        #[arg(long = "target", required = true)]
        target_columns: Vec<String>,

        /// Validation split fraction
        #[arg(long)]
        test_size: Option<f64>,

        /// Random seed
        #[arg(long)]
        random_state: Option<u64>,

        /// Run a grid search over the model parameters
        #[arg(long)]
        grid_search: bool,

        #[command(flatten)]
        extra: ExtraParams,
    },

    /// Predict on the test dataset
    Predict(ModelArgs),

    /// Evaluate a trained model
    Evaluate(ModelArgs),
}

/// `mldash stacking ...`
#[derive(Subcommand, Debug)]
pub enum StackingCommand {
    /// List the available base models
    Models,

    /// Train a stacking ensemble
    ///
    /// Example:
    ///   mldash stacking train --base-model rf --base-model gbr --meta-model LinearRegression
    Train {
        /// Base model key (repeatable)
        #[arg(long = "base-model")]
        base_models: Vec<String>,

        /// Meta model
        #[arg(long)]
        meta_model: Option<String>,

        /// Cross-validation folds
        #[arg(long)]
        cv_folds: Option<u32>,

        /// Target column (repeatable)
        #[arg(long = "target")]
        target_columns: Vec<String>,

        #[command(flatten)]
        extra: ExtraParams,
    },
}

/// `mldash automl`
#[derive(Args, Debug)]
pub struct AutoMlArgs {
    /// Target column (repeatable)
    #[arg(long = "target")]
    pub target_columns: Vec<String>,

    /// `grid` or `random`
    #[arg(long)]
    pub search_method: Option<String>,

    /// Cross-validation folds
    #[arg(long)]
    pub cv_folds: Option<u32>,

    /// Scoring function
    #[arg(long)]
    pub scoring: Option<String>,

    /// `fast` or `thorough`
    #[arg(long)]
    pub training_mode: Option<String>,

    /// Random search iterations
    #[arg(long)]
    pub max_iter: Option<u32>,

    /// Candidate model key (repeatable)
    #[arg(long = "model")]
    pub models: Vec<String>,

    #[command(flatten)]
    pub extra: ExtraParams,
}

/// `mldash viz ...`
#[derive(Subcommand, Debug)]
pub enum VizCommand {
    /// Chart a dataset
    ///
    /// Example:
    ///   mldash viz data --data-type train --kind correlation
    Data {
        /// `train` or `test`
        #[arg(long)]
        data_type: Option<String>,

        /// Chart family
        #[arg(long)]
        kind: Option<String>,

        /// Column to plot (repeatable)
        #[arg(long = "column")]
        columns: Vec<String>,

        /// X axis column for scatter plots
        #[arg(long)]
        x_column: Option<String>,

        /// Y axis column for scatter plots
        #[arg(long)]
        y_column: Option<String>,

        #[command(flatten)]
        extra: ExtraParams,
    },

    /// Chart a trained model
    Model {
        /// Trained model id
        #[arg(long)]
        model_id: Option<String>,

        /// Chart family
        #[arg(long)]
        kind: Option<String>,

        #[command(flatten)]
        extra: ExtraParams,
    },
}

/// `mldash reports ...`
#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Generate a report
    ///
    /// Example:
    ///   mldash reports generate --format html --project-name "Rolling line 3"
    Generate {
        /// Model the report describes
        #[arg(long)]
        model_id: Option<String>,

        /// Report flavour
        #[arg(long)]
        report_type: Option<String>,

        /// Output format (html, pdf, docx)
        #[arg(long)]
        format: Option<String>,

        /// Leave charts out
        #[arg(long)]
        no_charts: bool,

        /// Project name
        #[arg(long)]
        project_name: Option<String>,

        /// Author line
        #[arg(long)]
        author: Option<String>,

        #[command(flatten)]
        extra: ExtraParams,
    },

    /// List generated reports
    List,

    /// Download a report
    Download {
        /// Report id
        report_id: String,

        /// File format
        file_format: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete a report
    Delete {
        /// Report id
        report_id: String,
    },
}

/// `mldash models ...`
#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List stored model artifacts
    List,

    /// Download a model artifact
    Download {
        /// Model id
        model_id: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// `mldash config ...`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Model selector for predict/evaluate
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Trained model id (defaults to the current model)
    #[arg(long)]
    pub model_id: Option<String>,

    /// Include input features in the output
    #[arg(long)]
    pub include_features: bool,

    #[command(flatten)]
    pub extra: ExtraParams,
}

/// Free-form JSON merged into the request body
#[derive(Args, Debug, Default)]
pub struct ExtraParams {
    /// Extra body fields as a JSON object, e.g. '{"n_jobs": 4}'
    #[arg(long = "params")]
    pub json: Option<String>,
}

/// Where a download is written
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output file or directory (defaults to the server's file name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments
    ///
    /// # Returns
    ///
    /// Parsed CLI arguments
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}
