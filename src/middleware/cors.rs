use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsPolicy;
use crate::error::{Error, Result};

/// Builds the CORS layer for the browser client. Credentials are allowed in
/// both modes, so "any origin" reflects the caller's origin instead of `*`.
pub fn cors_layer(policy: &CorsPolicy) -> Result<CorsLayer> {
    let origin = match policy {
        CorsPolicy::AnyOrigin => AllowOrigin::mirror_request(),
        CorsPolicy::Origin(url) => {
            let value = HeaderValue::from_str(url)
                .map_err(|e| Error::Config(format!("Invalid FRONTEND_URL {}: {}", url, e)))?;
            AllowOrigin::exact(value)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origin_is_a_config_error() {
        let policy = CorsPolicy::Origin("http://bad\norigin".to_string());
        assert!(matches!(cors_layer(&policy), Err(Error::Config(_))));
    }

    #[test]
    fn both_policies_build() {
        assert!(cors_layer(&CorsPolicy::AnyOrigin).is_ok());
        assert!(cors_layer(&CorsPolicy::Origin("http://localhost:3000".into())).is_ok());
    }
}
