use clap::Parser;
use pc_build_advisor::core::AdvisorSettings;
use pc_build_advisor::utils::error::ErrorSeverity;
use pc_build_advisor::utils::{format, logger};
use pc_build_advisor::{Advisor, AdvisorError, BudgetAllocator, CliConfig, InferenceClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pc-build-advisor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let allocator = BudgetAllocator::from_settings(&settings);
    let advisor = match settings.upstream() {
        Some(upstream) => {
            tracing::info!("🔍 Inference endpoint enabled: {}", upstream.endpoint);
            match InferenceClient::new(upstream) {
                Ok(client) => Advisor::with_upstream(allocator, client),
                Err(e) => {
                    tracing::warn!("Could not build inference client: {}; running offline", e);
                    Advisor::offline(allocator)
                }
            }
        }
        None => Advisor::offline(allocator),
    };

    let recommendation = match advisor.recommend(&cli.budget, &cli.owned_components()).await {
        Ok(recommendation) => recommendation,
        Err(e) => exit_with(&e),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        println!(
            "{}",
            format::render_recommendation(settings.currency_symbol(), &recommendation)
        );
    }

    Ok(())
}

fn exit_with(e: &AdvisorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
