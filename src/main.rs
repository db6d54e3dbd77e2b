use anyhow::Context;
use clap::Parser;
use region_places::utils::{logger, validation::Validate};
use region_places::{app, CliArgs, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting region-places");
    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if args.dry_run {
        print_plan(&config);
        return Ok(());
    }

    match app::run(&config).await {
        Ok(output_path) => {
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Places generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_plan(config: &TomlConfig) {
    println!("🔍 DRY RUN - no geocoder requests will be made");
    println!("  match_on:         {}", config.generation.match_on);
    println!("  match_fail_limit: {}", config.match_fail_limit());
    println!("  reverse geocoder: {}", config.reverse_geocoder.kind);
    println!(
        "  output:           {}/{}",
        config.output.path, config.output.filename
    );
    for region in config.build_regions() {
        println!(
            "  - {} ({} places)",
            region.search_string(),
            region.requested_place_count()
        );
    }
}
