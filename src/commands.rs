//! Command implementations
//!
//! Each handler maps parsed CLI arguments onto one wrapper call and prints the
//! result. Envelopes go to stdout as pretty JSON; status lines are styled.

use crate::api::{
    self, endpoints, AutoMlParams, DataVisualizationParams, ModelQuery, ModelVisualizationParams,
    PreprocessParams, ReportParams, StackingParams, TrainParams,
};
use crate::cli::{
    AutoMlArgs, Cli, Commands, ConfigCommand, DataCommand, ExtraParams, MlCommand, ModelArgs,
    ModelsCommand, OutputArgs, ReportsCommand, StackingCommand, VizCommand,
};
use crate::client::{BinaryPayload, Envelope, Transport};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::notify::ConsoleNotifier;
use crate::{probe, routes};
use console::style;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Run the parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Config(cmd) => handle_config(cmd, &config, cli.config.as_deref()),
        Commands::Version => {
            println!("mldash v{}", crate::VERSION);
            Ok(())
        }
        Commands::Routes { all } => {
            print_routes(all);
            Ok(())
        }
        Commands::Health => handle_health(&config).await,
        command => {
            config.validate()?;
            let transport = Transport::from_config(&config, Arc::new(ConsoleNotifier))?;
            dispatch(command, &transport).await
        }
    }
}

/// Resolve the effective configuration: file, then environment, then flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    config.apply_env();
    if let Some(url) = &cli.api_url {
        config.base_url.clone_from(url);
    }
    if cli.verbose {
        config.verbose = true;
    }
    debug!(base_url = %config.base_url, "configuration loaded");
    Ok(config)
}

async fn dispatch(command: Commands, transport: &Transport) -> Result<()> {
    match command {
        Commands::Status => print_envelope(&api::system_status(transport).await?),
        Commands::Data(cmd) => handle_data(cmd, transport).await,
        Commands::Ml(cmd) => handle_ml(cmd, transport).await,
        Commands::Stacking(cmd) => handle_stacking(cmd, transport).await,
        Commands::Automl(args) => handle_automl(args, transport).await,
        Commands::Viz(cmd) => handle_viz(cmd, transport).await,
        Commands::Reports(cmd) => handle_reports(cmd, transport).await,
        Commands::Models(cmd) => handle_models(cmd, transport).await,
        Commands::Health | Commands::Routes { .. } | Commands::Config(_) | Commands::Version => {
            Err(ClientError::Internal("command handled before dispatch".to_string()))
        }
    }
}

async fn handle_health(config: &Config) -> Result<()> {
    let origin = config.origin_for(endpoints::HEALTH).ok_or_else(|| {
        ClientError::InvalidConfig(format!(
            "no base URL configured and no proxy rule matches {}",
            endpoints::HEALTH
        ))
    })?;
    let info = probe::server_info(origin).await;
    if info.is_available {
        println!("{} {} ({})", style("✓").green(), info.message, info.base_url);
        Ok(())
    } else {
        println!("{} {} ({})", style("✗").red(), info.message, info.base_url);
        Err(ClientError::Network(info.message))
    }
}

async fn handle_data(cmd: DataCommand, transport: &Transport) -> Result<()> {
    match cmd {
        DataCommand::LoadDefault => print_envelope(&api::load_default_data(transport).await?),
        DataCommand::Upload { train, test } => {
            let envelope =
                api::upload_files(transport, train.as_deref(), test.as_deref()).await?;
            print_envelope(&envelope)
        }
        DataCommand::Preview => print_envelope(&api::preview_data(transport).await?),
        DataCommand::Preprocess {
            methods,
            fill_method,
            fixed_value,
            outlier_method,
            extra,
        } => {
            let params = PreprocessParams {
                methods,
                fill_method,
                fixed_value,
                outlier_method,
                extra: parse_extra(&extra)?,
            };
            print_envelope(&api::preprocess_data(transport, &params).await?)
        }
        DataCommand::Download {
            data_type,
            file_format,
            output,
        } => {
            let payload = api::download_data(transport, &data_type, &file_format).await?;
            let fallback = format!("{data_type}_data.{file_format}");
            save_download(&payload, &output, &fallback).await
        }
    }
}

async fn handle_ml(cmd: MlCommand, transport: &Transport) -> Result<()> {
    match cmd {
        MlCommand::Models => print_envelope(&api::available_models(transport).await?),
        MlCommand::Train {
            model_type,
            target_columns,
            test_size,
            random_state,
            grid_search,
            extra,
        } => {
            let mut params = TrainParams::new(model_type, target_columns);
            params.test_size = test_size;
            params.random_state = random_state;
            params.use_grid_search = grid_search.then_some(true);
            params.extra = parse_extra(&extra)?;
            println!("{} Training started, this may take a while...", style("→").cyan());
            long_running("Training", api::train_model(transport, &params).await)
        }
        MlCommand::Predict(args) => {
            print_envelope(&api::predict(transport, &model_query(args)?).await?)
        }
        MlCommand::Evaluate(args) => {
            print_envelope(&api::evaluate_model(transport, &model_query(args)?).await?)
        }
    }
}

async fn handle_stacking(cmd: StackingCommand, transport: &Transport) -> Result<()> {
    match cmd {
        StackingCommand::Models => print_envelope(&api::stacking_models(transport).await?),
        StackingCommand::Train {
            base_models,
            meta_model,
            cv_folds,
            target_columns,
            extra,
        } => {
            let params = StackingParams {
                target_columns: non_empty(target_columns),
                base_models,
                meta_model,
                cv_folds,
                extra: parse_extra(&extra)?,
            };
            println!(
                "{} Stacking ensemble training started, this may take a while...",
                style("→").cyan()
            );
            long_running("Stacking training", api::train_stacking(transport, &params).await)
        }
    }
}

async fn handle_automl(args: AutoMlArgs, transport: &Transport) -> Result<()> {
    let params = AutoMlParams {
        target_columns: non_empty(args.target_columns),
        search_method: args.search_method,
        cv_folds: args.cv_folds,
        scoring: args.scoring,
        training_mode: args.training_mode,
        max_iter: args.max_iter,
        models: non_empty(args.models),
        extra: parse_extra(&args.extra)?,
    };
    println!("{} AutoML search started, this may take a while...", style("→").cyan());
    long_running("AutoML", api::run_automl(transport, &params).await)
}

async fn handle_viz(cmd: VizCommand, transport: &Transport) -> Result<()> {
    match cmd {
        VizCommand::Data {
            data_type,
            kind,
            columns,
            x_column,
            y_column,
            extra,
        } => {
            let params = DataVisualizationParams {
                data_type,
                kind,
                columns: non_empty(columns),
                chart_type: None,
                x_column,
                y_column,
                extra: parse_extra(&extra)?,
            };
            print_envelope(&api::data_visualization(transport, &params).await?)
        }
        VizCommand::Model {
            model_id,
            kind,
            extra,
        } => {
            let params = ModelVisualizationParams {
                model_id,
                kind,
                chart_type: None,
                extra: parse_extra(&extra)?,
            };
            print_envelope(&api::model_visualization(transport, &params).await?)
        }
    }
}

async fn handle_reports(cmd: ReportsCommand, transport: &Transport) -> Result<()> {
    match cmd {
        ReportsCommand::Generate {
            model_id,
            report_type,
            format,
            no_charts,
            project_name,
            author,
            extra,
        } => {
            let params = ReportParams {
                model_id,
                report_type,
                format,
                include_charts: no_charts.then_some(false),
                project_name,
                project_description: None,
                author,
                extra: parse_extra(&extra)?,
            };
            print_envelope(&api::generate_report(transport, &params).await?)
        }
        ReportsCommand::List => {
            let list = api::report_list(transport).await?;
            if list.reports.is_empty() {
                println!("No reports yet");
            }
            for report in &list.reports {
                println!(
                    "{}  {}  {}  {}",
                    style(&report.id).bold(),
                    report.kind,
                    report.format,
                    style(&report.timestamp).dim()
                );
            }
            Ok(())
        }
        ReportsCommand::Download {
            report_id,
            file_format,
            output,
        } => {
            let payload = api::download_report(transport, &report_id, &file_format).await?;
            let fallback = format!("report_{report_id}.{file_format}");
            save_download(&payload, &output, &fallback).await
        }
        ReportsCommand::Delete { report_id } => {
            let envelope = api::delete_report(transport, &report_id).await?;
            println!("{} Deleted report {report_id}", style("✓").green());
            if let Some(message) = envelope.message() {
                println!("{message}");
            }
            Ok(())
        }
    }
}

async fn handle_models(cmd: ModelsCommand, transport: &Transport) -> Result<()> {
    match cmd {
        ModelsCommand::List => print_envelope(&api::list_models(transport).await?),
        ModelsCommand::Download { model_id, output } => {
            let payload = api::download_model(transport, &model_id).await?;
            let fallback = format!("{model_id}.pkl");
            save_download(&payload, &output, &fallback).await
        }
    }
}

fn handle_config(cmd: ConfigCommand, config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };
    match cmd {
        ConfigCommand::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(ClientError::InvalidArgument(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(&path)?;
            println!("{} Wrote {}", style("✓").green(), path.display());
            Ok(())
        }
    }
}

fn print_routes(all: bool) {
    let entries: Vec<&routes::Route> = if all {
        routes::all().collect()
    } else {
        routes::sidebar().collect()
    };
    for route in entries {
        let title = route.meta.map_or("", |m| m.title);
        match route.target {
            routes::RouteTarget::View(view) => {
                println!("{:<20} {:<28} {}", route.path, title, style(view).dim());
            }
            routes::RouteTarget::Redirect(to) => {
                println!("{:<20} {:<28} -> {to}", route.path, title);
            }
        }
    }
}

/// Report the outcome of a train/automl/stacking call
///
/// Transport failures on these paths are not shown as notices, so they are
/// reported here.
fn long_running(label: &str, result: Result<Envelope>) -> Result<()> {
    match result {
        Ok(envelope) => {
            println!("{} {label} complete", style("✓").green());
            print_envelope(&envelope)
        }
        Err(err) => {
            if err.is_backend() && !err.is_business() {
                println!("{} {label} failed: {err}", style("✗").red());
            }
            Err(err)
        }
    }
}

fn print_envelope(envelope: &Envelope) -> Result<()> {
    let rendered = serde_json::to_string_pretty(envelope.as_value())
        .map_err(|e| ClientError::SerializationError(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

async fn save_download(payload: &BinaryPayload, output: &OutputArgs, fallback: &str) -> Result<()> {
    let path = download_target(payload, output.output.as_deref(), fallback);
    payload.save_to(&path).await?;
    println!(
        "{} Saved {} ({} bytes)",
        style("✓").green(),
        path.display(),
        payload.len()
    );
    Ok(())
}

/// Where a download lands: an explicit file, a file inside an explicit
/// directory, or the server-suggested name in the current directory
fn download_target(payload: &BinaryPayload, output: Option<&Path>, fallback: &str) -> PathBuf {
    let file_name = payload.file_name_or(fallback);
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn model_query(args: ModelArgs) -> Result<ModelQuery> {
    Ok(ModelQuery {
        model_id: args.model_id,
        include_features: args.include_features.then_some(true),
        extra: parse_extra(&args.extra)?,
    })
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Parse `--params` into body fields
fn parse_extra(extra: &ExtraParams) -> Result<Map<String, Value>> {
    let Some(raw) = extra.json.as_deref() else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ClientError::InvalidArgument(
            "--params must be a JSON object".to_string(),
        )),
        Err(e) => Err(ClientError::InvalidArgument(format!("--params is not valid JSON: {e}"))),
    }
}
