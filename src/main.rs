use clap::Parser;
use model_comparison::config::cli::{load_rules, normalize, read_input};
use model_comparison::utils::error::ErrorSeverity;
use model_comparison::utils::logger;
use model_comparison::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting model-comparison CLI");
    tracing::debug!("CLI config: {:?}", config);

    let outcome = load_rules(config.config.as_deref(), config.no_validate).and_then(|rules| {
        let input = read_input(&config.input)?;
        normalize(&input, config.kind, rules.as_ref(), config.pretty)
    });

    match outcome {
        Ok(encoded) => {
            println!("{}", encoded);
            tracing::info!("✅ {:?} record decoded", config.kind);
        }
        Err(e) => {
            tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
