use crate::adapters::arcgis::DEFAULT_ARCGIS_ENDPOINT;
use crate::adapters::json_writer::DEFAULT_OUTPUT_FILENAME;
use crate::adapters::nominatim::DEFAULT_NOMINATIM_ENDPOINT;
use crate::config::{default_regions, DEFAULT_PLACE_COUNT, MATCH_FAIL_LIMIT, MATCH_ON};
use crate::core::filter::PlaceAcceptanceFilter;
use crate::core::generator::RegionPlaceGenerator;
use crate::domain::model::Region;
use crate::utils::error::{PlaceGenError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const REVERSE_GEOCODER_KINDS: [&str; 2] = ["csv", "nominatim"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const DEFAULT_CITIES_CSV: &str = "rg_cities1000.csv";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default = "default_region_configs")]
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub reverse_geocoder: ReverseGeocoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_place_count")]
    pub default_place_count: usize,
    #[serde(default = "default_match_on")]
    pub match_on: String,
    pub match_fail_limit: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub search_string: String,
    pub place_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_resolver_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseGeocoderConfig {
    #[serde(default = "default_reverse_kind")]
    pub kind: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: String,
}

fn default_place_count() -> usize {
    DEFAULT_PLACE_COUNT
}

fn default_match_on() -> String {
    MATCH_ON.to_string()
}

fn default_region_configs() -> Vec<RegionConfig> {
    default_regions()
        .into_iter()
        .map(|region| RegionConfig {
            search_string: region.search_string().to_string(),
            place_count: Some(region.requested_place_count()),
        })
        .collect()
}

fn default_resolver_endpoint() -> String {
    DEFAULT_ARCGIS_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_reverse_kind() -> String {
    "csv".to_string()
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_output_filename() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_place_count: DEFAULT_PLACE_COUNT,
            match_on: default_match_on(),
            match_fail_limit: None,
            seed: None,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: default_resolver_endpoint(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for ReverseGeocoderConfig {
    fn default() -> Self {
        Self {
            kind: default_reverse_kind(),
            path: Some(DEFAULT_CITIES_CSV.to_string()),
            endpoint: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_output_filename(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            regions: default_region_configs(),
            resolver: ResolverConfig::default(),
            reverse_geocoder: ReverseGeocoderConfig::default(),
            output: OutputConfig::default(),
            logging: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlaceGenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlaceGenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEOCODER_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlaceGenError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("generation.match_on", &self.generation.match_on)?;
        validation::validate_positive_number(
            "generation.match_fail_limit",
            self.match_fail_limit(),
            1,
        )?;

        if self.regions.is_empty() {
            return Err(PlaceGenError::MissingConfigError {
                field: "regions".to_string(),
            });
        }
        for (i, region) in self.regions.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("regions[{}].search_string", i),
                &region.search_string,
            )?;
        }

        validation::validate_url("resolver.endpoint", &self.resolver.endpoint)?;
        validation::validate_positive_number(
            "resolver.timeout_seconds",
            self.resolver.timeout_seconds as usize,
            1,
        )?;

        validation::validate_one_of(
            "reverse_geocoder.kind",
            &self.reverse_geocoder.kind,
            &REVERSE_GEOCODER_KINDS,
        )?;
        if self.reverse_geocoder.kind == "csv" {
            let path =
                validation::validate_required_field("reverse_geocoder.path", &self.reverse_geocoder.path)?;
            validation::validate_path("reverse_geocoder.path", path)?;
        } else {
            validation::validate_url("reverse_geocoder.endpoint", self.reverse_endpoint())?;
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_path("output.filename", &self.output.filename)?;

        if let Some(logging) = &self.logging {
            validation::validate_one_of("logging.format", &logging.format, &LOG_FORMATS)?;
        }

        Ok(())
    }

    pub fn match_fail_limit(&self) -> usize {
        self.generation.match_fail_limit.unwrap_or(MATCH_FAIL_LIMIT)
    }

    pub fn reverse_endpoint(&self) -> &str {
        self.reverse_geocoder
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_NOMINATIM_ENDPOINT)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().map(|l| l.format == "json").unwrap_or(false)
    }

    /// Regions in configured order, with per-region overrides applied.
    pub fn build_regions(&self) -> Vec<Region> {
        self.regions
            .iter()
            .map(|r| {
                Region::new(
                    r.search_string.clone(),
                    r.place_count.unwrap_or(self.generation.default_place_count),
                )
            })
            .collect()
    }

    pub fn build_generator(&self) -> RegionPlaceGenerator {
        RegionPlaceGenerator::new(
            PlaceAcceptanceFilter::new(self.generation.match_on.clone()),
            self.match_fail_limit(),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[generation]
default_place_count = 20
match_on = "state"
match_fail_limit = 50
seed = 1234

[[regions]]
search_string = "Tasmania, Australia"
place_count = 5

[[regions]]
search_string = "Victoria, Australia"

[resolver]
endpoint = "https://geocoder.example.com/find"
timeout_seconds = 10

[reverse_geocoder]
kind = "nominatim"
endpoint = "https://nominatim.example.com/reverse"

[output]
path = "./out"
filename = "places.json"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.match_fail_limit(), 50);
        assert_eq!(config.generation.seed, Some(1234));
        assert_eq!(config.reverse_endpoint(), "https://nominatim.example.com/reverse");
        assert!(config.json_logging());

        let regions = config.build_regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].requested_place_count(), 5);
        assert_eq!(regions[1].requested_place_count(), 20);

        let generator = config.build_generator();
        assert_eq!(generator.match_on(), "state");
        assert_eq!(generator.match_fail_limit(), 50);
    }

    #[test]
    fn test_empty_config_uses_builtin_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        config.validate().unwrap();

        assert_eq!(config.generation.match_on, MATCH_ON);
        assert_eq!(config.match_fail_limit(), MATCH_FAIL_LIMIT);
        assert_eq!(config.match_fail_limit(), 1000);
        assert_eq!(config.regions.len(), 8);
        assert_eq!(config.reverse_geocoder.kind, "csv");
        assert_eq!(config.output.filename, "results.json");

        let regions = config.build_regions();
        assert_eq!(regions[0].search_string(), "Australian Capital Territory, Australia");
        assert_eq!(regions[0].requested_place_count(), 6);
        assert_eq!(regions[1].requested_place_count(), DEFAULT_PLACE_COUNT);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REGION_PLACES_TEST_RESOLVER", "https://resolver.test/find");

        let toml_content = r#"
[resolver]
endpoint = "${REGION_PLACES_TEST_RESOLVER}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.resolver.endpoint, "https://resolver.test/find");

        std::env::remove_var("REGION_PLACES_TEST_RESOLVER");
    }

    #[test]
    fn test_config_validation() {
        let bad_kind = TomlConfig::from_toml_str("[reverse_geocoder]\nkind = \"kdtree\"\n").unwrap();
        assert!(bad_kind.validate().is_err());

        let zero_limit = TomlConfig::from_toml_str("[generation]\nmatch_fail_limit = 0\n").unwrap();
        assert!(zero_limit.validate().is_err());

        let no_regions = TomlConfig::from_toml_str("regions = []\n").unwrap();
        assert!(matches!(
            no_regions.validate(),
            Err(PlaceGenError::MissingConfigError { .. })
        ));

        let bad_endpoint = TomlConfig::from_toml_str("[resolver]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_endpoint.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[generation\nmatch_on = ");
        assert!(matches!(
            result,
            Err(PlaceGenError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[[regions]]
search_string = "Queensland, Australia"
place_count = 90
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions[0].place_count, Some(90));
    }
}
