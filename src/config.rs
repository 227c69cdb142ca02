use secrecy::SecretString;

#[derive(serde::Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub klaviyo: KlaviyoConfig,
    pub campaign: CampaignConfig,
}

#[derive(serde::Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize)]
pub struct KlaviyoConfig {
    pub base_url: String,
    pub private_key: SecretString,
    /// 站点/公司标识，旧版identify接口的`token`
    pub company_id: String,
    pub revision: String,
    pub timeout_milliseconds: u64,
    pub delivery: Delivery,
    /// 随identify画像一并声明的营销授权渠道，留空则不发送`$consent`
    pub consent: Vec<String>,
}

/// 画像投递策略：结构化REST接口或旧版identify查询参数接口
#[derive(serde::Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Structured,
    LegacyIdentify,
}

#[derive(serde::Deserialize, Clone)]
pub struct CampaignConfig {
    /// 表单元素id，webhook推送体中的`form`字段
    pub form_id: String,
    /// 表单显示名，webhook推送体中的`name`字段
    pub form_name: String,
    /// CRM画像上区分本次活动参与者的布尔属性名
    pub tag: String,
    pub event_name: String,
    pub confirmation_path: String,
}

pub fn config() -> Config {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .expect("failed to read config.yaml.")
        .try_deserialize::<Config>()
        .expect("failed to deserialize config.yaml.")
}
