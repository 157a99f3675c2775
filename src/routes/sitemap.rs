use actix_web::{web, HttpResponse};

use crate::domain::locale::LOCALES;
use crate::startup::ApplicationBaseUrl;

pub fn render_sitemap(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let urls: String = LOCALES
        .iter()
        .map(|locale| {
            format!(
                "  <url>\n    <loc>{}/{}</loc>\n    <changefreq>weekly</changefreq>\n    <priority>0.9</priority>\n  </url>\n",
                base_url,
                locale.as_str()
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>\n",
        urls
    )
}

#[tracing::instrument(name = "Sitemap handler", skip(base_url))]
pub async fn sitemap(base_url: web::Data<ApplicationBaseUrl>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(render_sitemap(&base_url.0))
}
