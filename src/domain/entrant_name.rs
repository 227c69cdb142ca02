use crate::domain::{NamePolicy, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrantName {
    given: String,
    family: String,
}

impl EntrantName {
    /// 按空白拆分姓名：首个词为名，其余以单个空格拼接为姓
    pub fn split(full_name: &str) -> EntrantName {
        let mut tokens = full_name.split_whitespace();
        let given = tokens.next().unwrap_or_default().to_owned();
        let family = tokens.collect::<Vec<_>>().join(" ");

        Self { given, family }
    }

    pub fn parse(
        value: Option<&str>,
        policy: NamePolicy,
    ) -> Result<EntrantName, ValidationError> {
        match value.map(str::trim).filter(|name| !name.is_empty()) {
            Some(full_name) => Ok(Self::split(full_name)),
            None => match policy {
                NamePolicy::Required => Err(ValidationError::MissingName),
                NamePolicy::Optional => Ok(Self::default()),
            },
        }
    }

    pub fn given(&self) -> &str {
        &self.given
    }

    pub fn family(&self) -> &str {
        &self.family
    }
}
