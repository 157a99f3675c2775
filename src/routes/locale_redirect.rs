use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

use crate::domain::locale::Locale;

const PASSTHROUGH_PREFIXES: [&str; 2] = ["/api", "/_next"];

/// Where a path without a locale prefix should be sent, or `None` when the
/// request is left alone (api calls, assets, already-localized pages).
pub fn redirect_target(path: &str, query: &str) -> Option<String> {
    if PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        || is_public_file(path)
    {
        return None;
    }

    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");

    if Locale::parse(first_segment).is_some() {
        return None;
    }

    let path = if path == "/" { "" } else { path };
    let mut target = format!("/{}{}", Locale::default().as_str(), path);

    if !query.is_empty() {
        target.push('?');
        target.push_str(query);
    }

    Some(target)
}

fn is_public_file(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map(|segment| segment.contains('.'))
        .unwrap_or(false)
}

/// Catch-all for paths no route claims.
#[tracing::instrument(name = "Locale fallback", skip(request), fields(path = %request.path()))]
pub async fn locale_fallback(request: HttpRequest) -> HttpResponse {
    match redirect_target(request.path(), request.query_string()) {
        Some(target) => HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, target))
            .finish(),
        None => HttpResponse::NotFound().finish(),
    }
}
