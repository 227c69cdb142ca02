use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::AUTHORIZATION, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::{config::Delivery, domain::Entrant, util::error_chain_fmt};

pub struct KlaviyoClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    private_key: SecretString,
    company_id: String,
    revision: String,
    delivery: Delivery,
    consent: Vec<String>,
    campaign_tag: String,
}

impl KlaviyoClient {
    #[allow(clippy::too_many_arguments)]
    fn new(
        base_url: &str,
        private_key: SecretString,
        company_id: String,
        revision: String,
        timeout: Duration,
        delivery: Delivery,
        consent: Vec<String>,
        campaign_tag: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build klaviyo client.");
        let base_url = reqwest::Url::parse(base_url).expect("failed to parse base url.");

        Self {
            client,
            base_url,
            private_key,
            company_id,
            revision,
            delivery,
            consent,
            campaign_tag,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        let klaviyo_config = &config.klaviyo;

        Self::new(
            &klaviyo_config.base_url,
            klaviyo_config.private_key.clone(),
            klaviyo_config.company_id.clone(),
            klaviyo_config.revision.clone(),
            Duration::from_millis(klaviyo_config.timeout_milliseconds),
            klaviyo_config.delivery,
            klaviyo_config.consent.clone(),
            config.campaign.tag.clone(),
        )
    }

    /// 按配置的投递策略同步一次画像
    /// 传输层错误在此收敛为`UpsertOutcome::Failure`，不向上层抛出
    #[tracing::instrument(
        name = "向Klaviyo同步参与者画像...",
        skip(self, entrant),
        fields(
            email = %entrant.email.as_ref(),
            delivery = ?self.delivery
        )
    )]
    pub async fn upsert(&self, entrant: &Entrant) -> UpsertOutcome {
        let result = match self.delivery {
            Delivery::Structured => self.upsert_profile(entrant).await,
            Delivery::LegacyIdentify => self.identify(entrant).await,
        };

        match result {
            Ok(response) => {
                tracing::info!("画像同步成功.");
                UpsertOutcome::Success(response)
            }
            Err(error) => {
                tracing::error!("画像同步失败. {error:?}");
                UpsertOutcome::Failure(error)
            }
        }
    }

    /// 结构化REST接口：`POST /api/profiles/`，API key鉴权
    async fn upsert_profile(&self, entrant: &Entrant) -> Result<ProviderResponse, UpsertError> {
        let url = self.base_url.join("/api/profiles/").unwrap();
        let body = ProfileUpsertBody::new(entrant, &self.campaign_tag);

        let response = self
            .client
            .post(url)
            .header(
                AUTHORIZATION,
                format!("Klaviyo-API-Key {}", self.private_key.expose_secret()),
            )
            .header("revision", &self.revision)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            // 响应体解析失败时按不透明文本原样返回
            Ok(serde_json::from_str(&body)
                .map(ProviderResponse::Structured)
                .unwrap_or(ProviderResponse::Opaque(body)))
        } else {
            Err(UpsertError::NonSuccessStatus { status, body })
        }
    }

    /// 旧版identify接口：画像JSON经base64编码后塞进查询参数
    async fn identify(&self, entrant: &Entrant) -> Result<ProviderResponse, UpsertError> {
        let payload = IdentifyPayload::new(
            &self.company_id,
            entrant,
            &self.campaign_tag,
            &self.consent,
        );
        let data =
            STANDARD.encode(serde_json::to_vec(&payload).expect("identify payload is plain json."));
        let mut url = self.base_url.join("/api/identify").unwrap();
        url.query_pairs_mut().append_pair("data", &data);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::OK {
            Ok(ProviderResponse::Opaque(body))
        } else {
            Err(UpsertError::NonSuccessStatus { status, body })
        }
    }
}

#[derive(Debug)]
pub enum UpsertOutcome {
    Success(ProviderResponse),
    Failure(UpsertError),
}

#[derive(Debug)]
pub enum ProviderResponse {
    Structured(Value),
    Opaque(String),
}

#[derive(thiserror::Error)]
pub enum UpsertError {
    #[error("Klaviyo API error: {status} - {body}")]
    NonSuccessStatus { status: StatusCode, body: String },
    #[error("failed to reach the Klaviyo API")]
    Network(#[from] reqwest::Error),
}

impl std::fmt::Debug for UpsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ProfileUpsertBody<'a> {
    data: ProfileData<'a>,
}

#[derive(serde::Serialize)]
struct ProfileData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: ProfileAttributes<'a>,
}

#[derive(serde::Serialize)]
struct ProfileAttributes<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    location: Location<'a>,
    properties: serde_json::Map<String, Value>,
}

#[derive(serde::Serialize)]
struct Location<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<&'a str>,
}

impl<'a> ProfileUpsertBody<'a> {
    fn new(entrant: &'a Entrant, campaign_tag: &str) -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert(campaign_tag.to_owned(), Value::Bool(true));

        Self {
            data: ProfileData {
                kind: "profile",
                attributes: ProfileAttributes {
                    email: entrant.email.as_ref(),
                    first_name: entrant.name.given(),
                    last_name: entrant.name.family(),
                    phone_number: entrant.phone.as_deref(),
                    location: Location {
                        zip: entrant.postal_code.as_deref(),
                    },
                    properties,
                },
            },
        }
    }
}

#[derive(serde::Serialize)]
struct IdentifyPayload<'a> {
    token: &'a str,
    properties: serde_json::Map<String, Value>,
}

impl<'a> IdentifyPayload<'a> {
    fn new(token: &'a str, entrant: &Entrant, campaign_tag: &str, consent: &[String]) -> Self {
        let mut properties = legacy_properties(entrant, campaign_tag);
        if !consent.is_empty() {
            properties.insert("$consent".into(), json!(consent));
        }

        Self { token, properties }
    }
}

/// 旧版`$`前缀画像属性，identify查询参数与客户端事件队列共用
pub(crate) fn legacy_properties(
    entrant: &Entrant,
    campaign_tag: &str,
) -> serde_json::Map<String, Value> {
    let mut properties = serde_json::Map::new();
    properties.insert("$email".into(), json!(entrant.email.as_ref()));
    properties.insert("$first_name".into(), json!(entrant.name.given()));
    properties.insert("$last_name".into(), json!(entrant.name.family()));
    properties.insert(
        "$phone_number".into(),
        json!(entrant.phone.as_deref().unwrap_or("")),
    );
    properties.insert(
        "$zip".into(),
        json!(entrant.postal_code.as_deref().unwrap_or("")),
    );
    properties.insert(campaign_tag.to_owned(), Value::Bool(true));

    properties
}
