use super::{EntrantEmail, EntrantName, NamePolicy, RawFormEvent, ValidationError};

/// 规范化后的抽奖参与者，构造成功即通过校验，之后不可变
#[derive(Debug)]
pub struct Entrant {
    pub email: EntrantEmail,
    pub name: EntrantName,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
}

impl Entrant {
    pub fn from_event(
        event: &RawFormEvent,
        policy: NamePolicy,
    ) -> Result<Entrant, ValidationError> {
        let email = EntrantEmail::parse(event.email())?;
        let name = EntrantName::parse(event.name(), policy)?;

        Ok(Self {
            email,
            name,
            phone: event.phone().map(str::to_owned),
            postal_code: event.postal_code().map(str::to_owned),
        })
    }
}
