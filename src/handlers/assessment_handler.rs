use crate::models::reading::Vitals;
use crate::services::severity;
use actix_web::{web, HttpResponse, Responder};
use log::{debug, warn};
use serde_json::json;

pub async fn assess_handler(vitals: web::Json<Vitals>) -> impl Responder {
    let vitals = vitals.into_inner();

    if let Err(range_err) = vitals.check_ranges() {
        warn!("Rejected reading: {}", range_err);
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid reading",
            "details": range_err.to_string()
        }));
    }

    let assessment = severity::assess(&vitals);
    debug!("assessment: {:?}", assessment);
    HttpResponse::Ok().json(assessment)
}
