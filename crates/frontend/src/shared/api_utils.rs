//! API configuration and URL helpers.
//!
//! Settings are baked in at build time (`option_env!`); `build.rs` forwards
//! them from a `.env` file when present.

const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Runtime configuration, provided through context by `App`
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// `PROFITUP_API_URL`
    pub api_base: String,
    /// `PROFITUP_DEV_TOKEN`, only honored in debug builds
    pub dev_token: Option<String>,
    /// `PROFITUP_API_TIMEOUT_MS`
    pub timeout_ms: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("PROFITUP_API_URL"),
            option_env!("PROFITUP_DEV_TOKEN"),
            option_env!("PROFITUP_API_TIMEOUT_MS"),
            cfg!(debug_assertions),
        )
    }

    pub fn from_values(
        api_url: Option<&str>,
        dev_token: Option<&str>,
        timeout_ms: Option<&str>,
        debug_build: bool,
    ) -> Self {
        let api_base = api_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string();

        let dev_token = dev_token
            .map(str::trim)
            .filter(|s| debug_build && !s.is_empty())
            .map(str::to_string);

        let timeout_ms = timeout_ms
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_base,
            dev_token,
            timeout_ms,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, false)
    }
}

pub fn is_absolute_url(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Joins `path` to `base` with exactly one `/` between them.
/// Absolute URLs are returned unchanged.
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://api.local/", "/api/productos"), "http://api.local/api/productos");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

/// Percent-encodes a single path segment (ids, codes)
pub fn segment(value: impl std::fmt::Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_single_slash() {
        for base in ["http://api.local", "http://api.local/", "http://api.local//"] {
            for path in ["api/productos", "/api/productos", "//api/productos"] {
                assert_eq!(join_url(base, path), "http://api.local/api/productos");
            }
        }
    }

    #[test]
    fn test_join_url_keeps_base_path() {
        assert_eq!(
            join_url("https://erp.example.com/backend/", "/auth/me"),
            "https://erp.example.com/backend/auth/me"
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(
            join_url("http://api.local", "https://cdn.example.com//x"),
            "https://cdn.example.com//x"
        );
        assert_eq!(
            join_url("http://api.local", "HTTP://other/y"),
            "HTTP://other/y"
        );
    }

    #[test]
    fn test_config_defaults_and_dev_token() {
        let config = AppConfig::from_values(None, Some("dev"), Some("abc"), false);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.dev_token, None);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);

        let config = AppConfig::from_values(Some(" http://x "), Some("dev"), Some("5000"), true);
        assert_eq!(config.api_base, "http://x");
        assert_eq!(config.dev_token.as_deref(), Some("dev"));
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("A/B 1"), "A%2FB%201");
        assert_eq!(segment(42), "42");
    }
}
