use crate::config::Config;

pub const PRODUCTION_MEDIA_BASE: &str = "https://api.bersekolah.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultImage {
    Mentor,
    Testimonial,
    User,
    Article,
    Logo,
}

impl DefaultImage {
    fn path(self) -> &'static str {
        match self {
            DefaultImage::Mentor => "/assets/image/defaults/mentor-default.jpg",
            DefaultImage::Testimonial => "/storage/defaults/testimoni-default.jpg",
            DefaultImage::User => "/assets/image/defaults/user-default.jpg",
            DefaultImage::Article => "/assets/image/defaults/artikel-default.jpg",
            DefaultImage::Logo => "/assets/image/navbar/logo.png",
        }
    }
}

/// Media lives at the API host root for localhost and bersekolah.com bases.
/// Any other base is used as configured.
pub fn media_base_url(config: &Config) -> String {
    if config.is_production() {
        return PRODUCTION_MEDIA_BASE.to_string();
    }
    let api = config.api_base_url.as_str();
    if api.contains("bersekolah.com") && !api.contains("api.bersekolah.com") {
        return PRODUCTION_MEDIA_BASE.to_string();
    }
    if api.contains("localhost") || api.contains("bersekolah.com") {
        return api.strip_suffix("/api").unwrap_or(api).to_string();
    }
    api.to_string()
}

pub fn media_url(config: &Config, path: &str) -> String {
    let clean = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", media_base_url(config), clean)
}

pub fn storage_url(config: &Config, path: &str) -> String {
    format!("{}/{}", media_base_url(config), path)
}

pub fn default_image_url(config: &Config, kind: DefaultImage) -> String {
    format!("{}{}", media_base_url(config), kind.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn production() -> Config {
        let mut config = Config::development("https://sandybrown-capybara-903436.hostingersite.com/api");
        config.environment = Environment::Production;
        config
    }

    #[test]
    fn production_uses_media_host() {
        let config = production();
        assert_eq!(
            media_url(&config, "/assets/image/navbar/logo.png"),
            "https://api.bersekolah.com/assets/image/navbar/logo.png"
        );
        assert_eq!(
            media_url(&config, "assets/image/navbar/logo.png"),
            "https://api.bersekolah.com/assets/image/navbar/logo.png"
        );
        assert_eq!(
            storage_url(&config, "storage/testimoni/image.jpg"),
            "https://api.bersekolah.com/storage/testimoni/image.jpg"
        );
        assert_eq!(
            default_image_url(&config, DefaultImage::Logo),
            "https://api.bersekolah.com/assets/image/navbar/logo.png"
        );
    }

    #[test]
    fn localhost_drops_api_suffix() {
        let config = Config::development("http://localhost:8000/api");
        assert_eq!(media_base_url(&config), "http://localhost:8000");
        assert_eq!(
            default_image_url(&config, DefaultImage::Mentor),
            "http://localhost:8000/assets/image/defaults/mentor-default.jpg"
        );
    }

    #[test]
    fn bare_marketing_host_maps_to_media_host() {
        let config = Config::development("https://bersekolah.com/api");
        assert_eq!(media_base_url(&config), PRODUCTION_MEDIA_BASE);
        let config = Config::development("https://api.bersekolah.com/api");
        assert_eq!(media_base_url(&config), PRODUCTION_MEDIA_BASE);
    }

    #[test]
    fn other_hosts_are_used_as_configured() {
        let config = Config::development("https://staging.example.org/api");
        assert_eq!(media_base_url(&config), "https://staging.example.org/api");
        assert_eq!(
            media_url(&config, "/storage/a.jpg"),
            "https://staging.example.org/api/storage/a.jpg"
        );
    }
}
