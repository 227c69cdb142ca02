use std::net::TcpListener;

use actix_web::web;
use klaviyo_relay::{klaviyo::KlaviyoClient, telemetry};
use once_cell::sync::Lazy;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| telemetry::init_subscriber("test"));

pub async fn spawn_app() -> (String, MockServer) {
    Lazy::force(&TRACING);

    let mut config = klaviyo_relay::config::config();
    let address = format!("{}:{}", &config.web.host, 0);
    let listener = TcpListener::bind(&address).expect("failed to bind web port.");

    // 模拟Klaviyo服务端
    let klaviyo_server = MockServer::start().await;
    config.klaviyo.base_url = klaviyo_server.uri();
    let client = web::Data::new(KlaviyoClient::from_config(&config));
    let campaign = web::Data::new(config.campaign);

    // 获取绑定的随机端口
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://{}:{}", &config.web.host, &port);

    tokio::spawn(klaviyo_relay::run(listener, client, campaign));

    (address, klaviyo_server)
}
