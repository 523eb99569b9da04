#![allow(dead_code)]

use bookmarks_core::application::services::ImportService;
use bookmarks_core::config::{Config, NormalizationConfig};
use bookmarks_core::infrastructure::persistence::InMemoryLinkRepository;
use bookmarks_core::telemetry;
use bookmarks_core::utils::url_normalizer::Normalizer;
use std::path::PathBuf;
use std::sync::Arc;

pub const RULES: &str = r#"
[UrlNormalisations]
add-www = ["theguardian.com"]
remove-www = ["www.jacobin.com", "www.jacobinmag.com", "www.tribunemag.co.uk"]
force-https = ["www.theguardian.com", "jacobin.com", "tribunemag.co.uk", "newsocialist.org.uk"]

[UrlNormalisations.replace-domain]
"jacobinmag.com" = "jacobin.com"
"#;

pub fn test_config() -> Config {
    Config {
        rules_path: PathBuf::from("tests/config.toml"),
        log_level: "warn".to_string(),
        log_format: "text".to_string(),
        normalizations: NormalizationConfig::from_toml_str(RULES).unwrap(),
    }
}

pub fn normalizer() -> Arc<Normalizer> {
    Arc::new(test_config().normalizer())
}

pub fn create_test_service() -> (
    ImportService<InMemoryLinkRepository>,
    Arc<InMemoryLinkRepository>,
) {
    // Another test may already have installed the subscriber.
    let config = test_config();
    let _ = telemetry::init(&config);
    config.print_summary();

    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = ImportService::new(normalizer(), repo.clone());

    (service, repo)
}
