use clap::Parser;
use helpdesk_analytics::config::Command;
use helpdesk_analytics::core::{DayRange, PriorityClassifier};
use helpdesk_analytics::utils::error::ErrorSeverity;
use helpdesk_analytics::utils::{logger, validation::Validate};
use helpdesk_analytics::{AnalyticsConfig, AnalyticsEngine, AnalyticsError, CliConfig, CsvStore};
use serde::Serialize;

fn load_config(cli: &CliConfig) -> helpdesk_analytics::Result<AnalyticsConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyticsConfig::from_file(path)?,
        None => AnalyticsConfig::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.store.data_dir = data_dir.clone();
    }
    if cli.verbose {
        config.logging.verbose = true;
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> helpdesk_analytics::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(
    command: &Command,
    config: &AnalyticsConfig,
    engine: &AnalyticsEngine<CsvStore>,
) -> helpdesk_analytics::Result<()> {
    match command {
        Command::Classify { text } => {
            let classifier = config.classifier.build();
            match classifier.explain(text) {
                Some((_, keyword)) => tracing::debug!("Matched keyword '{}'", keyword),
                None => tracing::debug!("No keyword matched, using {}", classifier.fallback()),
            }
            print_json(&serde_json::json!({ "priority": classifier.classify(text) }))
        }
        Command::ResponseTimes(args) => {
            let window = args.window()?;
            let stats = engine.response_time_by_priority(window.as_ref()).await?;
            print_json(&stats)
        }
        Command::Staff(args) => {
            let window = args.window()?;
            let rows = engine.staff_performance(window.as_ref()).await?;
            print_json(&rows)
        }
        Command::Distribution(args) => {
            let window = args.window()?;
            let counts = engine.priority_distribution(window.as_ref()).await?;
            print_json(&counts)
        }
        Command::Pending => {
            let queue = engine.pending_queue().await?;
            print_json(&queue)
        }
        Command::Answered(args) => {
            let window = args.window()?;
            let log = engine.answered_log(window.as_ref()).await?;
            print_json(&log)
        }
        Command::Trend { start, end } => {
            let trend = engine.daily_trend(*start, *end).await?;
            print_json(&trend)
        }
        Command::Compare {
            period1_start,
            period1_end,
            period2_start,
            period2_end,
        } => {
            let period1 = DayRange::new(*period1_start, *period1_end)?;
            let period2 = DayRange::new(*period2_start, *period2_end)?;
            let comparison = engine.compare(period1, period2).await?;
            print_json(&comparison)
        }
        Command::Report(args) => {
            let window = args.window()?;
            let report = engine.report(window.as_ref()).await?;
            print_json(&report)
        }
    }
}

fn exit_with(e: &AnalyticsError) -> ! {
    tracing::error!(
        "❌ Analytics command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::debug!("Analytics config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let engine = AnalyticsEngine::new(config.csv_store());
    tracing::info!("Reading support data from {}", config.store.data_dir);

    if let Err(e) = run(&cli.command, &config, &engine).await {
        exit_with(&e);
    }

    Ok(())
}
