use serde_json::Value;

/// 表单平台推送的原始提交数据
/// 字段名大小写在两条接入路径上并不一致，读取时按别名逐个尝试
#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct RawFormEvent(serde_json::Map<String, Value>);

impl RawFormEvent {
    fn field(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|key| {
            self.0
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
    }

    pub fn email(&self) -> Option<&str> {
        self.field(&["Email", "email"])
    }

    pub fn name(&self) -> Option<&str> {
        self.field(&["Name", "name"])
    }

    pub fn phone(&self) -> Option<&str> {
        self.field(&["Phone", "phone"])
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.field(&["Zip-Code", "zipCode", "zip"])
    }

    /// 判断该提交是否来自目标表单
    /// 表单平台推送的`name`为表单显示名，`form`为表单元素id
    pub fn is_from_form(&self, form_name: &str, form_id: &str) -> bool {
        self.0.get("name").and_then(Value::as_str) == Some(form_name)
            || self.0.get("form").and_then(Value::as_str) == Some(form_id)
    }
}
