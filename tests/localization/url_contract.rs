//! URL path-prefix contract and initial locale resolution.

use langgate::i18n::{
    LocaleSignal, LocaleSignals, SupportedLocales, localized_location, localized_path,
    resolve_initial_locale, resolve_with_signal,
};

fn locales() -> SupportedLocales {
    SupportedLocales::new(["en", "fr", "de", "es"], "en").expect("valid locales")
}

#[test]
fn prefixes_follow_target_locale() {
    let supported = locales();
    let de = supported.get("de").expect("de supported");
    let fr = supported.get("fr").expect("fr supported");
    let en = supported.default_locale().clone();

    assert_eq!(localized_path("/fr/team", &de, &supported), "/de/team");
    assert_eq!(localized_path("/fr/team", &en, &supported), "/team");
    assert_eq!(localized_path("/", &fr, &supported), "/fr/");
    assert_eq!(localized_path("/team", &fr, &supported), "/fr/team");
    assert_eq!(localized_path("/frontier", &de, &supported), "/de/frontier");
}

#[test]
fn location_rewrite_keeps_query_and_shape() {
    let supported = locales();
    let de = supported.get("de").expect("de supported");

    assert_eq!(
        localized_location("/fr/team?lang=fr&x=1", &de, &supported, "lang"),
        "/de/team?lang=de&x=1"
    );
    assert_eq!(
        localized_location("https://example.org/fr/team", &de, &supported, "lang"),
        "https://example.org/de/team"
    );
    assert_eq!(localized_location("/team?x=1", &de, &supported, "lang"), "/de/team?x=1");
}

#[test]
fn signals_resolve_in_priority_order() {
    let supported = locales();

    let signals = LocaleSignals::from_location("/team?lang=de", "lang")
        .with_persisted(Some("es".to_string()))
        .with_browser(Some("fr-CH".to_string()));
    assert_eq!(
        resolve_with_signal(&signals, &supported).1,
        LocaleSignal::Query
    );

    let signals = LocaleSignals::from_location("/team", "lang")
        .with_persisted(Some("xx".to_string()))
        .with_browser(Some("fr-CH".to_string()));
    let (locale, signal) = resolve_with_signal(&signals, &supported);
    assert_eq!(locale.as_str(), "fr");
    assert_eq!(signal, LocaleSignal::Browser);

    let signals = LocaleSignals::from_location("/team?lang=zz", "lang")
        .with_browser(Some("pt-BR".to_string()));
    assert_eq!(resolve_initial_locale(&signals, &supported).as_str(), "en");
}
