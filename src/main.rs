use std::net::TcpListener;

use actix_web::web;
use klaviyo_relay::{klaviyo::KlaviyoClient, telemetry};

#[tokio::main]
async fn main() {
    // 遥测初始化
    telemetry::init_subscriber("klaviyo-relay");

    let config = klaviyo_relay::config::config();
    let listener =
        TcpListener::bind(config.web.server_address()).expect("failed to bind web port.");

    // 构造web Arc
    let client = web::Data::new(KlaviyoClient::from_config(&config));
    let campaign = web::Data::new(config.campaign);

    let _ = klaviyo_relay::run(listener, client, campaign).await;
}
