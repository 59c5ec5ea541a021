//! Pipeline over a local asset directory.

use std::fs;
use std::path::Path;

use langgate::i18n::{
    FileFetcher, ResolutionPipeline, SourceEnumerator, SupportedLocales, missing_keys,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create asset dir");
    }
    fs::write(path, contents).expect("Failed to write asset");
}

fn pipeline(root: &Path) -> ResolutionPipeline<FileFetcher> {
    let locales = SupportedLocales::new(["en", "fr", "de", "es"], "en").expect("valid locales");
    let base = root.display().to_string();
    let sources = SourceEnumerator::new(
        &base,
        ["/i18n/{locale}.json", "/{locale}.json", "/locales/{locale}.json"],
    );
    ResolutionPipeline::new(FileFetcher::new(root), sources, locales)
}

#[tokio::test]
async fn first_available_source_wins_in_priority_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write(temp_dir.path(), "locales/fr.json", r#"{"nav":{"contact":"locales"}}"#);
    write(temp_dir.path(), "fr.json", r#"{"nav":{"contact":"root"}}"#);

    let p = pipeline(temp_dir.path());
    let fr = p.locales().get("fr").expect("fr supported");
    let resolution = p.resolve(&fr).await;

    assert_eq!(resolution.served, Some(fr));
    assert_eq!(resolution.document.lookup("nav.contact"), Some("root"));
}

#[tokio::test]
async fn malformed_candidate_is_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write(temp_dir.path(), "i18n/de.json", "{ not json");
    write(temp_dir.path(), "de.json", r#"["an", "array"]"#);
    write(temp_dir.path(), "locales/de.json", r#"{"hero":{"title":"Klarheit"}}"#);

    let p = pipeline(temp_dir.path());
    let de = p.locales().get("de").expect("de supported");
    let document = p.load_locale(&de).await;
    assert_eq!(document.lookup("hero.title"), Some("Klarheit"));
}

#[tokio::test]
async fn missing_locale_falls_back_to_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write(temp_dir.path(), "i18n/en.json", r#"{"nav":{"contact":"Contact Us"}}"#);

    let p = pipeline(temp_dir.path());
    let es = p.locales().get("es").expect("es supported");
    let resolution = p.resolve(&es).await;

    assert!(resolution.used_fallback());
    assert_eq!(resolution.document.lookup("nav.contact"), Some("Contact Us"));
}

#[tokio::test]
async fn empty_directory_is_total_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let p = pipeline(temp_dir.path());
    let fr = p.locales().get("fr").expect("fr supported");

    let resolution = p.resolve(&fr).await;
    assert!(resolution.is_total_failure());
    assert!(resolution.document.is_empty());
}

#[tokio::test]
async fn audit_reports_keys_missing_from_a_locale() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write(
        temp_dir.path(),
        "i18n/en.json",
        r#"{"nav":{"home":"Home","contact":"Contact Us"},"hero":{"title":"Clarity"}}"#,
    );
    write(temp_dir.path(), "i18n/de.json", r#"{"nav":{"home":"Startseite"}}"#);

    let p = pipeline(temp_dir.path());
    let en = p.locales().default_locale().clone();
    let de = p.locales().get("de").expect("de supported");
    let reference = p.load_exact(&en).await.expect("en document");
    let other = p.load_exact(&de).await.expect("de document");

    assert_eq!(
        missing_keys(&reference, &other),
        vec!["hero.title".to_string(), "nav.contact".to_string()]
    );
}
