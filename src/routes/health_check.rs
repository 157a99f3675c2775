use actix_web::HttpResponse;

/// Liveness probe for the intake service. Empty 200, no store round-trip.
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
