use actix_web::{error, web, HttpResponse, Responder};
use log::warn;
use serde_json::json;

pub mod assessment_handler;
pub mod suggestion_handler;

pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// JSON extractor settings shared by every route: any content type is
/// accepted, and undecodable bodies become a 400 with a fixed message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            warn!("Rejected request payload: {}", err);
            let details = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(json!({
                    "error": INVALID_PAYLOAD,
                    "details": details
                })),
            )
            .into()
        })
}

pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
