//! Configuration file wired into a working pipeline.

use std::fs;

use langgate::config::load_config;
use langgate::i18n::{AssetFetcher, ResolutionPipeline};
use tempfile::TempDir;

#[tokio::test]
async fn relative_base_loads_documents_next_to_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let assets = temp_dir.path().join("public").join("lang");
    fs::create_dir_all(&assets).expect("Failed to create asset dir");
    fs::write(assets.join("fr.json"), r#"{"hero":{"title":"La clarté"}}"#)
        .expect("Failed to write fr");

    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    let config_path = config_dir.join("i18n.yml");
    fs::write(
        &config_path,
        "default_locale: en\nlocales: [en, fr]\nbase: ../public\nsources: ['/lang/{locale}.json']\n",
    )
    .expect("Failed to write config");

    let config = load_config(&config_path).expect("config loads");
    let fetcher = config.fetcher();
    assert!(matches!(fetcher, AssetFetcher::File(_)));

    let locales = config.supported_locales().expect("valid locales");
    let fr = locales.get("fr").expect("fr supported");
    let pipeline = ResolutionPipeline::new(fetcher, config.source_enumerator(), locales);
    let resolution = pipeline.resolve(&fr).await;

    assert_eq!(resolution.served, Some(fr));
    assert_eq!(resolution.document.lookup("hero.title"), Some("La clarté"));
}
