//! Company domain entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

pub const NAME_MAX_LEN: usize = 15;
pub const DESCRIPTION_MAX_LEN: usize = 3000;

/// Legal form of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Corporations,
    NonProfit,
    Cooperative,
    #[serde(rename = "Sole Proprietorship", alias = "SoleProprietorship")]
    SoleProprietorship,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corporations => "Corporations",
            Self::NonProfit => "NonProfit",
            Self::Cooperative => "Cooperative",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company record.
///
/// `id` is assigned by the store on create and taken from the operation
/// parameter on update; whatever the caller put there is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount_of_employees: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

impl Company {
    /// Check the field invariants a store must never see violated.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > NAME_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "name must be 1-{} characters",
                NAME_MAX_LEN
            )));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                return Err(DomainError::Validation(format!(
                    "description must be at most {} characters",
                    DESCRIPTION_MAX_LEN
                )));
            }
        }
        if self.amount_of_employees < 1 {
            return Err(DomainError::Validation(
                "amount_of_employees must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Company {
        Company {
            id: Uuid::nil(),
            name: "test-company".into(),
            description: Some("some description".into()),
            amount_of_employees: 123,
            registered: true,
            company_type: CompanyType::Corporations,
        }
    }

    #[test]
    fn test_company_type_serde_rejects_unknown_value() {
        let parsed: Result<CompanyType, _> = serde_json::from_str("\"Partnership\"");
        assert!(parsed.is_err());

        let alias: CompanyType = serde_json::from_str("\"SoleProprietorship\"").unwrap();
        assert_eq!(alias, CompanyType::SoleProprietorship);
        assert_eq!(
            serde_json::to_string(&alias).unwrap(),
            "\"Sole Proprietorship\""
        );
    }

    #[test]
    fn test_company_serializes_type_field() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "Corporations");
        assert_eq!(json["amount_of_employees"], 123);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut c = sample();
        c.name = String::new();
        assert!(c.validate().is_err());

        let mut c = sample();
        c.name = "a-name-that-is-too-long".into();
        assert!(c.validate().is_err());

        let mut c = sample();
        c.amount_of_employees = 0;
        assert!(c.validate().is_err());

        let mut c = sample();
        c.description = Some("x".repeat(DESCRIPTION_MAX_LEN + 1));
        assert!(c.validate().is_err());

        let mut c = sample();
        c.description = None;
        assert!(c.validate().is_ok());
    }
}
