mod entrant;
mod entrant_email;
mod entrant_name;
mod raw_event;

pub use entrant::Entrant;
pub use entrant_email::EntrantEmail;
pub use entrant_name::EntrantName;
pub use raw_event::RawFormEvent;

/// 两条接入路径对姓名字段的校验策略不同：
/// 浏览器表单路径要求必填，webhook路径允许缺失
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamePolicy {
    Required,
    Optional,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Name is required")]
    MissingName,
}
