use clap::Parser;
use dwarf_giant::core::ConfigProvider;
use dwarf_giant::utils::{logger, validation::Validate};
use dwarf_giant::{
    EtlEngine, LocalStorage, PairCoordinator, PairingError, PairingPipeline, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-pairs")]
#[command(about = "Dwarf/giant pairing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pairs.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be processed without pairing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no pairs will be generated");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let pipeline = match PairingPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run_with_result().await {
        Ok((output, result)) => {
            for pair in &result.pairs {
                println!("{}", pair);
            }
            tracing::info!("✅ {} pairs generated, output: {}", result.pairs.len(), output);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let workers = config
        .workers()
        .unwrap_or_else(|| PairCoordinator::from_host().workers());

    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("  {}", description);
    }
    tracing::info!("  Source: {}", config.data_path());
    tracing::info!(
        "  Mode: {}",
        if config.concurrent() {
            format!("concurrent ({} workers)", workers)
        } else {
            "sequential".to_string()
        }
    );
    if let Some(seed) = config.seed() {
        tracing::info!("  Seed: {}", seed);
    }
    tracing::info!("  On invalid input: {:?}", config.error_policy());
    if !config.output_formats().is_empty() {
        tracing::info!(
            "  Output: {} ({})",
            config.output_path(),
            config.output_formats().join(", ")
        );
    }
}

fn fail(e: &PairingError) -> ! {
    tracing::error!("❌ Pairing failed: {} (Severity: {:?})", e, e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}
