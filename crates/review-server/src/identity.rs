use axum::http::HeaderMap;
use review_core::config::ServerConfig;
use review_core::identity::IdentitySource;

/// Viewer identity taken from a request header set by the fronting proxy,
/// falling back to the configured `default_user`.
pub struct HeaderIdentity<'a> {
    pub headers: &'a HeaderMap,
    pub config: &'a ServerConfig,
}

impl IdentitySource for HeaderIdentity<'_> {
    fn current_user(&self) -> Option<String> {
        self.headers
            .get(self.config.identity_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.config
                    .default_user
                    .clone()
                    .filter(|u| !u.trim().is_empty())
            })
    }
}
