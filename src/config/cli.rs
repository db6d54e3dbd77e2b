use crate::config::toml_config::TomlConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "region-places")]
#[command(about = "Generate named places inside administrative regions by reverse geocoding random points")]
pub struct CliArgs {
    /// Path to TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the random seed from config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the output directory from config
    #[arg(long)]
    pub output_path: Option<String>,

    /// Resolve and print the plan without generating places
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(seed) = self.seed {
            config.generation.seed = Some(seed);
            tracing::info!("🔧 Seed overridden to: {}", seed);
        }
        if let Some(path) = &self.output_path {
            config.output.path = path.clone();
            tracing::info!("🔧 Output path overridden to: {}", path);
        }
    }
}
