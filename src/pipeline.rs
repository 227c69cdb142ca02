use std::sync::Arc;

use crate::{
    config::CampaignConfig,
    domain::{Entrant, NamePolicy, RawFormEvent, ValidationError},
    event_queue::{self, EventQueue},
    klaviyo::{KlaviyoClient, UpsertOutcome},
};

/// 浏览器表单路径的一次提交
pub struct FormSubmission {
    pub fields: RawFormEvent,
    /// 表单元素上的`redirect`属性
    pub redirect: Option<String>,
}

/// 提交处理完成后调用方应执行的动作
#[derive(Debug, PartialEq, Eq)]
pub enum Disposition {
    /// 跳转到确认页
    Redirect(String),
    /// 显示表单自带的错误提示元素
    RevealError,
}

#[tracing::instrument(name = "处理浏览器表单提交...", skip_all)]
pub async fn handle_submission(
    submission: FormSubmission,
    client: &KlaviyoClient,
    queue: Option<Arc<dyn EventQueue>>,
    campaign: &CampaignConfig,
) -> Result<Disposition, ValidationError> {
    // 浏览器表单路径要求姓名必填
    let entrant = Entrant::from_event(&submission.fields, NamePolicy::Required)?;

    // 次级通道先行派发，不阻塞、不参与主结果
    if let Some(queue) = queue {
        event_queue::dispatch_detached(queue, &entrant, campaign);
    }

    match client.upsert(&entrant).await {
        UpsertOutcome::Success(_) => {
            let target = submission
                .redirect
                .unwrap_or_else(|| campaign.confirmation_path.clone());
            Ok(Disposition::Redirect(target))
        }
        UpsertOutcome::Failure(_) => Ok(Disposition::RevealError),
    }
}
