//! Cross-origin policy so catalog UIs on other origins can call the API.
use tower_http::cors::CorsLayer;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
