//! Helpers for constructing URLs to static assets that respect the deployment base path.

/// Build the URL for a static asset such as a tile atlas.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/volcano` for GitHub Pages),
/// generated URLs are prefixed accordingly. Without it, paths stay relative
/// to the page so the viewer works from any directory.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return relative.to_string();
    }
    let rel = relative.trim_start_matches('/');
    format!("{base}/{rel}")
}

#[cfg(test)]
mod tests {
    use super::asset_path_with_base;

    #[test]
    fn keeps_relative_paths_without_base() {
        assert_eq!(
            asset_path_with_base("icons/maptiles_8.png", ""),
            "icons/maptiles_8.png"
        );
        assert_eq!(asset_path_with_base("icons/a.png", "  "), "icons/a.png");
    }

    #[test]
    fn prefixes_public_base() {
        assert_eq!(
            asset_path_with_base("icons/maptiles_16.png", "/volcano/"),
            "/volcano/icons/maptiles_16.png"
        );
        assert_eq!(
            asset_path_with_base("/icons/maptiles_16.png", "/volcano"),
            "/volcano/icons/maptiles_16.png"
        );
    }
}
