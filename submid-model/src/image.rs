//! Image URL resolution for menu and promo artwork.
//!
//! Stored image references are either absolute URLs (object storage) or bare
//! file names written by the local-disk upload fallback.

/// Placeholder served when a record carries no image.
pub const NO_IMAGE_PLACEHOLDER: &str = "/images/no-image.png";

/// Which upload folder a bare file name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageKind {
    #[default]
    Menu,
    Promo,
}

impl ImageKind {
    pub const fn upload_folder(self) -> &'static str {
        match self {
            ImageKind::Menu => "menu",
            ImageKind::Promo => "promos",
        }
    }
}

/// Resolve a stored image reference into something a page can render.
pub fn resolve_image_url(raw: Option<&str>, kind: ImageKind) -> String {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return NO_IMAGE_PLACEHOLDER.to_string(),
    };

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    format!("/uploads/{}/{}", kind.upload_folder(), raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_uses_placeholder() {
        assert_eq!(resolve_image_url(None, ImageKind::Promo), NO_IMAGE_PLACEHOLDER);
        assert_eq!(resolve_image_url(Some(""), ImageKind::Menu), NO_IMAGE_PLACEHOLDER);
    }

    #[test]
    fn whitespace_is_kept_as_a_file_name() {
        assert_eq!(
            resolve_image_url(Some("  "), ImageKind::Menu),
            "/uploads/menu/  "
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://cdn.example.com/promos/latte.jpg";
        assert_eq!(resolve_image_url(Some(url), ImageKind::Promo), url);
    }

    #[test]
    fn bare_names_map_to_upload_folder() {
        assert_eq!(
            resolve_image_url(Some("latte.jpg"), ImageKind::Promo),
            "/uploads/promos/latte.jpg"
        );
        assert_eq!(
            resolve_image_url(Some("espresso.png"), ImageKind::Menu),
            "/uploads/menu/espresso.png"
        );
    }
}
