use crate::models::reading::{Reading, SuggestionResponse};
use crate::services::SuggestionProvider;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde_json::json;

pub async fn suggest_handler(
    reading: web::Json<Reading>,
    provider: web::Data<dyn SuggestionProvider>,
) -> impl Responder {
    let reading = reading.into_inner();

    match provider.suggest(&reading).await {
        Ok(suggestion) => HttpResponse::Ok().json(SuggestionResponse { suggestion }),
        Err(service_err) => {
            error!("Suggestion service error: {}", service_err);

            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to get suggestion",
                "details": service_err.to_string()
            }))
        }
    }
}
