use clap::Parser;
use dwarf_giant::utils::{logger, validation::Validate};
use dwarf_giant::{CliConfig, EtlEngine, LocalStorage, Pair, PairingError, PairingPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting dwarf-giant CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let print_json = config.json;

    let pipeline = match PairingPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run_with_result().await {
        Ok((output, result)) => {
            print_pairs(&result.pairs, print_json)?;
            if output != "stdout" {
                tracing::info!("📁 Pairs saved to: {}", output);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn print_pairs(pairs: &[Pair], as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(pairs)?);
    } else {
        for pair in pairs {
            println!("{}", pair);
        }
    }
    Ok(())
}

fn fail(e: &PairingError) -> ! {
    tracing::error!(
        "❌ Pairing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}
