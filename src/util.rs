use std::time::Duration;

use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// Load environment files, then install the global tracing subscriber.
///
/// Lookup order for the env file: `ENV_FILE`, then `.env` discovery in the
/// working directory. Existing process variables are never overwritten.
/// Returns a label describing where the environment came from.
pub fn init_tracing() -> String {
    let env_source = load_env_file();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
    env_source
}

fn load_env_file() -> String {
    if let Ok(p) = std::env::var("ENV_FILE") {
        let p = p.trim();
        if !p.is_empty() && std::path::Path::new(p).is_file() && dotenvy::from_filename(p).is_ok() {
            return format!("{p} (ENV_FILE)");
        }
    }
    match dotenvy::dotenv() {
        Ok(path) => path.display().to_string(),
        Err(_) => "process environment".into(),
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Comma-separated env list. `None` when unset or `*`, meaning "allow any".
fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let raw = raw.trim();
    if raw == "*" {
        return None;
    }
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Build a CORS layer from environment variables.
///
/// - CORS_ALLOWED_ORIGINS: comma list or `*`
/// - CORS_ALLOWED_METHODS: comma list or `*`
/// - CORS_ALLOWED_HEADERS: comma list or `*`
/// - CORS_ALLOW_CREDENTIALS: 1|true|yes|on (only honoured with explicit lists)
/// - CORS_MAX_AGE: max age in seconds (u64)
///
/// Unset variables are permissive (Any); browsers calling a local mock rarely
/// need anything else.
pub fn cors_layer_from_env() -> CorsLayer {
    let mut layer = CorsLayer::new();
    let mut explicit = true;

    let origins = env_list("CORS_ALLOWED_ORIGINS").map(|list| {
        list.iter()
            .filter_map(|o| http::HeaderValue::from_str(o).ok())
            .collect::<Vec<_>>()
    });
    layer = match origins {
        Some(vals) if !vals.is_empty() => layer.allow_origin(AllowOrigin::list(vals)),
        _ => {
            explicit = false;
            layer.allow_origin(Any)
        }
    };

    let methods = env_list("CORS_ALLOWED_METHODS").map(|list| {
        list.iter()
            .filter_map(|m| http::Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
            .collect::<Vec<_>>()
    });
    layer = match methods {
        Some(vals) if !vals.is_empty() => layer.allow_methods(AllowMethods::list(vals)),
        _ => {
            explicit = false;
            layer.allow_methods(Any)
        }
    };

    let headers = env_list("CORS_ALLOWED_HEADERS").map(|list| {
        list.iter()
            .filter_map(|h| http::header::HeaderName::try_from(h.as_str()).ok())
            .collect::<Vec<_>>()
    });
    layer = match headers {
        Some(vals) if !vals.is_empty() => layer.allow_headers(AllowHeaders::list(vals)),
        _ => {
            explicit = false;
            layer.allow_headers(Any)
        }
    };

    // tower-http panics on credentials combined with a wildcard
    if explicit {
        if let Ok(val) = std::env::var("CORS_ALLOW_CREDENTIALS") {
            if is_truthy(&val) {
                layer = layer.allow_credentials(true);
            }
        }
    }

    if let Ok(secs) = std::env::var("CORS_MAX_AGE") {
        if let Ok(n) = secs.trim().parse::<u64>() {
            layer = layer.max_age(Duration::from_secs(n));
        }
    }

    layer
}
