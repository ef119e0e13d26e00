use tracing::warn;

/// Locale used when the configured one has no translations
pub const FALLBACK_LOCALE: &str = "en";

/// Set the process-wide locale, falling back to English for unknown locales.
///
/// Returns the locale that was actually applied.
pub fn set_locale(locale: &str) -> &'static str {
    let available = rust_i18n::available_locales!();
    let chosen = available
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(locale))
        .unwrap_or_else(|| {
            warn!("Locale '{}' is not available, using '{}'", locale, FALLBACK_LOCALE);
            FALLBACK_LOCALE
        });

    rust_i18n::set_locale(chosen);
    chosen
}
