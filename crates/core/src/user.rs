//! User profile types
//!
//! Profiles are owned by the external user directory; the core only reads
//! them to scope vocabularies, categories and reply copy.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the user directory
pub type UserId = i64;

/// Opaque reference to where the user's transactions are recorded
/// (e.g. a spreadsheet id)
pub type LedgerHandle = String;

/// Kind of financial profile the user signed up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Personal finances only
    Personal,
    /// Individual entrepreneur mixing business and personal finances
    BusinessIndividual,
}

impl ProfileKind {
    /// Whether this profile tracks a separate business context.
    pub fn has_business_context(&self) -> bool {
        matches!(self, Self::BusinessIndividual)
    }
}

/// User profile, read-only from the core's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Channel address in E.164-ish form, e.g. "whatsapp:+5511999990000"
    pub phone_number: String,
    /// Preferred name collected during onboarding
    pub display_name: Option<String>,
    pub profile_kind: ProfileKind,
    pub onboarding_complete: bool,
    pub ledger_handle: LedgerHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_kind_business_context() {
        assert!(ProfileKind::BusinessIndividual.has_business_context());
        assert!(!ProfileKind::Personal.has_business_context());
    }

    #[test]
    fn test_profile_kind_serde_names() {
        let json = serde_json::to_string(&ProfileKind::BusinessIndividual).unwrap();
        assert_eq!(json, "\"business_individual\"");
    }
}
