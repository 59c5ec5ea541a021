//! Locale context driven end to end: bootstrap, switch, persist, restart.

use std::fs;
use std::path::Path;

use langgate::i18n::{
    CommitOutcome, ContextOptions, FileFetcher, FileStore, LoadStatus, Localizer,
    PreferenceStore, ResolutionPipeline, SourceEnumerator, SupportedLocales, t,
};
use tempfile::TempDir;

fn site(root: &Path) {
    let dir = root.join("i18n");
    fs::create_dir_all(&dir).expect("Failed to create asset dir");
    fs::write(dir.join("en.json"), r#"{"nav":{"contact":"Contact Us"}}"#)
        .expect("Failed to write en");
    fs::write(dir.join("fr.json"), r#"{"nav":{"contact":"Contactez-nous"}}"#)
        .expect("Failed to write fr");
}

fn localizer(root: &Path, store: FileStore, location: &str) -> Localizer<FileFetcher, FileStore> {
    let locales = SupportedLocales::new(["en", "fr", "de", "es"], "en").expect("valid locales");
    let sources = SourceEnumerator::new(&root.display().to_string(), ["/i18n/{locale}.json"]);
    let pipeline = ResolutionPipeline::new(FileFetcher::new(root), sources, locales);
    Localizer::bootstrap(pipeline, store, ContextOptions::default(), location, None)
}

#[tokio::test]
async fn explicit_choice_survives_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    site(temp_dir.path());
    let prefs = temp_dir.path().join("state").join("locale.conf");

    let first = localizer(temp_dir.path(), FileStore::new(&prefs, "yb_lang"), "/team");
    first.load_initial().await;
    assert!(!prefs.exists(), "initial load must not persist");

    assert_eq!(
        first.change_locale_code("fr").await,
        CommitOutcome::Committed(LoadStatus::Ready)
    );
    assert_eq!(first.context().location(), "/fr/team");
    let saved = fs::read_to_string(&prefs).expect("preference written");
    assert!(saved.contains("yb_lang = fr"));

    let second = localizer(temp_dir.path(), FileStore::new(&prefs, "yb_lang"), "/team");
    let ctx = second.context();
    assert_eq!(ctx.locale().as_str(), "fr");
    second.load_initial().await;
    assert_eq!(t(&ctx, "nav.contact"), "Contactez-nous");
}

#[tokio::test]
async fn path_prefix_beats_persisted_choice() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    site(temp_dir.path());
    let prefs = temp_dir.path().join("locale.conf");
    FileStore::new(&prefs, "yb_lang")
        .save(&SupportedLocales::new(["en", "fr"], "en")
            .expect("valid locales")
            .get("fr")
            .expect("fr supported"))
        .expect("save preference");

    let loc = localizer(temp_dir.path(), FileStore::new(&prefs, "yb_lang"), "/de/team");
    assert_eq!(loc.context().locale().as_str(), "de");
}

#[tokio::test]
async fn missing_locale_renders_default_text_and_keys_for_gaps() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    site(temp_dir.path());
    let prefs = temp_dir.path().join("locale.conf");

    let loc = localizer(temp_dir.path(), FileStore::new(&prefs, "yb_lang"), "/es/");
    let mut ctx = loc.context();
    let (_, settled) = tokio::join!(loc.load_initial(), ctx.settled());
    let settled = settled.expect("localizer alive");

    assert_eq!(settled.status, LoadStatus::Ready);
    assert_eq!(settled.active_locale.as_str(), "es");
    assert_eq!(settled.served_locale.map(|l| l.to_string()), Some("en".to_string()));
    assert_eq!(t(&ctx, "nav.contact"), "Contact Us");
    assert_eq!(t(&ctx, "nav.missing"), "nav.missing");
}
