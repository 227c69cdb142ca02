use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    config::CampaignConfig,
    domain::{Entrant, NamePolicy, RawFormEvent},
    klaviyo::{KlaviyoClient, UpsertOutcome},
};

#[tracing::instrument(name = "处理表单平台webhook推送...", skip(event, client, campaign))]
pub async fn webhook(
    event: web::Json<RawFormEvent>,
    client: web::Data<KlaviyoClient>,
    campaign: web::Data<CampaignConfig>,
) -> HttpResponse {
    let event = event.into_inner();

    // 非目标表单的推送按成功应答，避免表单平台重试或误报失败
    if !event.is_from_form(&campaign.form_name, &campaign.form_id) {
        tracing::info!("非目标表单提交，跳过.");
        return HttpResponse::Ok().json(json!({ "message": "Form not matched" }));
    }

    // webhook路径允许姓名缺失
    let entrant = match Entrant::from_event(&event, NamePolicy::Optional) {
        Ok(entrant) => entrant,
        Err(error) => {
            tracing::error!("表单字段校验失败. {error}");
            return HttpResponse::BadRequest().json(json!({ "error": error.to_string() }));
        }
    };

    match client.upsert(&entrant).await {
        UpsertOutcome::Success(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Profile updated in Klaviyo",
        })),
        UpsertOutcome::Failure(error) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": error.to_string(),
        })),
    }
}
