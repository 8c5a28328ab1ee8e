use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's profile as stored in the record store. One row per user;
/// every save replaces the row wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
    pub degree: String,
    pub graduation_year: i32,
    pub skills: Vec<String>,
    pub certificates: Vec<String>,
    pub work_experience: String,
    pub updated_at: DateTime<Utc>,
}

/// The profile as submitted and edited by the user. Skills and certificates
/// are set-like: membership-checked on insert, but kept as ordered sequences
/// so the display order matches the order the user added them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub university: String,
    pub degree: String,
    pub graduation_year: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<String>,
    #[serde(default)]
    pub work_experience: String,
}

impl Profile {
    /// The empty profile shown to a user who has never saved one.
    pub fn default_for_now() -> Self {
        Profile {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            university: String::new(),
            degree: String::new(),
            graduation_year: Utc::now().year(),
            skills: Vec::new(),
            certificates: Vec::new(),
            work_experience: String::new(),
        }
    }

    /// Adds a skill unless it is blank or already present.
    /// Returns whether the list changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        add_tag(&mut self.skills, skill)
    }

    /// Removes a skill. Removing an absent skill is a no-op.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        remove_tag(&mut self.skills, skill)
    }

    /// Adds a certificate unless it is blank or already present.
    pub fn add_certificate(&mut self, certificate: &str) -> bool {
        add_tag(&mut self.certificates, certificate)
    }

    /// Removes a certificate. Removing an absent certificate is a no-op.
    pub fn remove_certificate(&mut self, certificate: &str) -> bool {
        remove_tag(&mut self.certificates, certificate)
    }

    /// Re-applies the duplicate-suppressing add operation to both lists, so a
    /// profile arriving over the wire satisfies the same set-like invariant
    /// as one built through `add_skill`/`add_certificate`.
    pub fn normalized(mut self) -> Self {
        self.skills = dedup_ordered(std::mem::take(&mut self.skills));
        self.certificates = dedup_ordered(std::mem::take(&mut self.certificates));
        self
    }

    /// Returns the first required field that is empty, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("university", &self.university),
            ("degree", &self.degree),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            university: row.university,
            degree: row.degree,
            graduation_year: row.graduation_year,
            skills: row.skills,
            certificates: row.certificates,
            work_experience: row.work_experience,
        }
    }
}

fn add_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

fn remove_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let before = tags.len();
    tags.retain(|t| t != tag);
    tags.len() != before
}

fn dedup_ordered(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        add_tag(&mut out, &tag);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        Profile {
            full_name: "Akosua Mensah".to_string(),
            email: "akosua@example.com".to_string(),
            phone: String::new(),
            university: "University of Ghana".to_string(),
            degree: "BSc CS".to_string(),
            graduation_year: 2024,
            skills: vec![],
            certificates: vec![],
            work_experience: String::new(),
        }
    }

    #[test]
    fn test_add_skill_preserves_insertion_order() {
        let mut profile = sample();
        assert!(profile.add_skill("Rust"));
        assert!(profile.add_skill("Marketing"));
        assert!(profile.add_skill("Excel"));
        assert_eq!(profile.skills, vec!["Rust", "Marketing", "Excel"]);
    }

    #[test]
    fn test_duplicate_add_is_a_noop() {
        let mut profile = sample();
        profile.add_skill("Rust");
        assert!(!profile.add_skill("Rust"));
        assert!(!profile.add_skill("  Rust  "));
        assert_eq!(profile.skills, vec!["Rust"]);
    }

    #[test]
    fn test_blank_add_is_a_noop() {
        let mut profile = sample();
        assert!(!profile.add_skill("   "));
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_remove_absent_skill_is_a_noop() {
        let mut profile = sample();
        profile.add_skill("Rust");
        assert!(!profile.remove_skill("Python"));
        assert_eq!(profile.skills, vec!["Rust"]);
    }

    #[test]
    fn test_remove_then_readd_moves_to_end() {
        let mut profile = sample();
        profile.add_certificate("AWS CCP");
        profile.add_certificate("Google IT");
        assert!(profile.remove_certificate("AWS CCP"));
        assert!(profile.add_certificate("AWS CCP"));
        assert_eq!(profile.certificates, vec!["Google IT", "AWS CCP"]);
    }

    #[test]
    fn test_normalized_dedupes_and_keeps_first_occurrence_order() {
        let mut profile = sample();
        profile.skills = vec![
            "Rust".to_string(),
            "Excel".to_string(),
            "Rust".to_string(),
            " ".to_string(),
        ];
        let profile = profile.normalized();
        assert_eq!(profile.skills, vec!["Rust", "Excel"]);
    }

    #[test]
    fn test_normalized_is_idempotent() {
        let mut profile = sample();
        profile.skills = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        let once = profile.normalized();
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_required_reports_first_empty_field() {
        let mut profile = sample();
        assert_eq!(profile.missing_required(), None);
        profile.university = "  ".to_string();
        assert_eq!(profile.missing_required(), Some("university"));
    }

    #[test]
    fn test_row_conversion_preserves_every_field() {
        let mut submitted = sample();
        submitted.add_skill("Rust");
        submitted.add_skill("Public Speaking");
        submitted.add_certificate("AWS CCP");

        // The row as the store would hand it back after an upsert.
        let row = ProfileRow {
            user_id: Uuid::new_v4(),
            full_name: submitted.full_name.clone(),
            email: submitted.email.clone(),
            phone: submitted.phone.clone(),
            university: submitted.university.clone(),
            degree: submitted.degree.clone(),
            graduation_year: submitted.graduation_year,
            skills: submitted.skills.clone(),
            certificates: submitted.certificates.clone(),
            work_experience: submitted.work_experience.clone(),
            updated_at: Utc::now(),
        };

        assert_eq!(Profile::from(row), submitted);
    }

    #[test]
    fn test_default_profile_has_empty_lists() {
        let profile = Profile::default_for_now();
        assert!(profile.full_name.is_empty());
        assert!(profile.skills.is_empty());
        assert!(profile.certificates.is_empty());
    }
}
