use volcano_core::PageConfig;

const PAGE_JSON: &str = include_str!("../static/page.json");

/// Page wiring shipped with the bundle, or the built-in defaults when the
/// embedded document does not parse.
#[must_use]
pub fn page_config() -> PageConfig {
    PageConfig::from_json(PAGE_JSON).unwrap_or_else(|err| {
        log::warn!("static/page.json rejected ({err}); using default page wiring");
        PageConfig::default()
    })
}
