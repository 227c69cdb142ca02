use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::{config::CampaignConfig, domain::Entrant, klaviyo};

/// 客户端事件队列能力端口，对应浏览器中的`_learnq`全局队列
/// 该能力可能不存在，由调用方显式注入，而不是运行时探测全局变量
#[async_trait]
pub trait EventQueue: Send + Sync + 'static {
    async fn identify(&self, properties: Value) -> anyhow::Result<()>;

    async fn track(&self, event: &str, properties: Value) -> anyhow::Result<()>;
}

/// 次级通道：在分离任务中推送identify画像与报名track事件
/// 结果被有意丢弃，失败只记录debug日志，不影响主投递结果
pub fn dispatch_detached(
    queue: Arc<dyn EventQueue>,
    entrant: &Entrant,
    campaign: &CampaignConfig,
) {
    let identify_properties = Value::Object(klaviyo::legacy_properties(entrant, &campaign.tag));
    let track_properties = json!({
        "sweepstakes_name": campaign.form_name,
        "entry_date": Utc::now().to_rfc3339(),
    });
    let event_name = campaign.event_name.clone();

    tokio::spawn(async move {
        if let Err(error) = queue.identify(identify_properties).await {
            tracing::debug!("事件队列identify推送失败. {error:?}");
        }
        if let Err(error) = queue.track(&event_name, track_properties).await {
            tracing::debug!("事件队列track推送失败. {error:?}");
        }
    });
}
