use crate::handlers::{self, assessment_handler, suggestion_handler};
use crate::services::SuggestionProvider;
use actix_web::web;

pub fn vitals_routes(
    provider: web::Data<dyn SuggestionProvider>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(provider)
            .app_data(handlers::json_config())
            .route("/suggest", web::post().to(suggestion_handler::suggest_handler))
            .route("/assess", web::post().to(assessment_handler::assess_handler))
            .route("/health", web::get().to(handlers::health_handler));
    }
}
