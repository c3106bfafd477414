use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account role, fixed at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Startup,
    Institute,
    Investor,
    General,
}

impl UserRole {
    /// General users are complete out of the box; every other role is asked
    /// to fill in a role-specific profile after signup.
    pub fn requires_profile_completion(self) -> bool {
        !matches!(self, UserRole::General)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Startup => "startup",
            UserRole::Institute => "institute",
            UserRole::Investor => "investor",
            UserRole::General => "general",
        };
        f.write_str(s)
    }
}

/// Verification status, set once at signup and moderated externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Verified,
    Rejected,
}

/// Role-specific profile payload.
///
/// Each variant carries only the fields its role needs, so adding a role is
/// a compile-checked change wherever profiles are rendered or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Admin(AdminProfile),
    Startup(StartupProfile),
    Institute(InstituteProfile),
    Investor(InvestorProfile),
    General(GeneralProfile),
}

impl RoleProfile {
    /// The role this profile variant belongs to.
    pub fn role(&self) -> UserRole {
        match self {
            RoleProfile::Admin(_) => UserRole::Admin,
            RoleProfile::Startup(_) => UserRole::Startup,
            RoleProfile::Institute(_) => UserRole::Institute,
            RoleProfile::Investor(_) => UserRole::Investor,
            RoleProfile::General(_) => UserRole::General,
        }
    }

    /// Empty profile of the right shape for a freshly signed-up role.
    pub fn empty_for(role: UserRole) -> Self {
        match role {
            UserRole::Admin => RoleProfile::Admin(AdminProfile::default()),
            UserRole::Startup => RoleProfile::Startup(StartupProfile::default()),
            UserRole::Institute => RoleProfile::Institute(InstituteProfile::default()),
            UserRole::Investor => RoleProfile::Investor(InvestorProfile::default()),
            UserRole::General => RoleProfile::General(GeneralProfile::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminProfile {
    pub designation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupProfile {
    pub company: Option<String>,
    pub designation: Option<String>,
    pub funding_stage: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstituteProfile {
    pub institute: Option<String>,
    pub designation: Option<String>,
    pub established_year: Option<String>,
    pub student_count: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub research_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorProfile {
    pub firm: Option<String>,
    pub designation: Option<String>,
    pub investment_range: Option<String>,
    pub sectors: Vec<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralProfile {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// User document as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile_completed: bool,
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input collected by the signup form.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// General users may supply their profile at signup; other roles fill
    /// theirs in through the completion flow.
    pub profile: Option<RoleProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_role_needs_no_completion() {
        assert!(!UserRole::General.requires_profile_completion());
        assert!(UserRole::Startup.requires_profile_completion());
        assert!(UserRole::Admin.requires_profile_completion());
    }

    #[test]
    fn empty_profile_matches_role() {
        for role in [
            UserRole::Admin,
            UserRole::Startup,
            UserRole::Institute,
            UserRole::Investor,
            UserRole::General,
        ] {
            assert_eq!(RoleProfile::empty_for(role).role(), role);
        }
    }

    #[test]
    fn profile_serializes_with_role_tag() {
        let profile = RoleProfile::Startup(StartupProfile {
            company: Some("Bright Ideas".into()),
            funding_stage: Some("Seed".into()),
            sectors: vec!["EdTech".into()],
            ..Default::default()
        });
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "startup");
        assert_eq!(json["company"], "Bright Ideas");
        assert_eq!(json["fundingStage"], "Seed");

        let back: RoleProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn user_document_is_camel_case() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: UserRole::General,
            status: UserStatus::Pending,
            profile_completed: true,
            profile: RoleProfile::General(GeneralProfile::default()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["profileCompleted"], true);
        assert_eq!(json["role"], "general");
        assert_eq!(json["status"], "pending");
    }
}
