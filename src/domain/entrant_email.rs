use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrantEmail(String);

impl EntrantEmail {
    pub fn parse(value: Option<&str>) -> Result<EntrantEmail, ValidationError> {
        match value.map(str::trim).filter(|email| !email.is_empty()) {
            Some(email) => Ok(Self(email.into())),
            None => Err(ValidationError::MissingEmail),
        }
    }
}

impl AsRef<str> for EntrantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
