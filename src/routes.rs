mod webhook;

pub use webhook::*;

use actix_web::{HttpResponse, Responder};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("Klaviyo webhook server is running")
}
