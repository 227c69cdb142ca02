use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{config::CampaignConfig, klaviyo::KlaviyoClient, routes};

pub fn run(
    listener: TcpListener,
    client: web::Data<KlaviyoClient>,
    campaign: web::Data<CampaignConfig>,
) -> Server {
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(client.clone())
            .app_data(campaign.clone())
            .route("/", web::get().to(routes::health_check))
            .route("/webhook/klaviyo", web::post().to(routes::webhook))
    })
    .listen(listener)
    .expect("failed to listen on web port.")
    .run()
}
