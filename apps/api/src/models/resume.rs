use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on entries in any single section.
pub const MAX_SECTION_ENTRIES: usize = 100;
/// Upper bound on characters in any single text field.
pub const MAX_FIELD_CHARS: usize = 10_000;

/// A complete resume as edited by the user.
///
/// Every section is independently optional. A missing key, `null`, or an
/// empty array all mean "no section". Entry order is preserved as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<CertificationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub cgpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Returns the field value only when it holds at least one character.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary validation
// ────────────────────────────────────────────────────────────────────────────

/// Text fields of a record, keyed by their JSON name.
trait TextFields {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)>;
}

impl TextFields for PersonalInfo {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
            ("linkedin", &self.linkedin),
            ("github", &self.github),
            ("portfolio", &self.portfolio),
        ]
    }
}

impl TextFields for SkillEntry {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![("category", &self.category), ("items", &self.items)]
    }
}

impl TextFields for ExperienceEntry {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("description", &self.description),
        ]
    }
}

impl TextFields for EducationEntry {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![
            ("degree", &self.degree),
            ("university", &self.university),
            ("year", &self.year),
            ("cgpa", &self.cgpa),
        ]
    }
}

impl TextFields for ProjectEntry {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![
            ("title", &self.title),
            ("techStack", &self.tech_stack),
            ("description", &self.description),
        ]
    }
}

impl TextFields for CertificationEntry {
    fn text_fields(&self) -> Vec<(&'static str, &Option<String>)> {
        vec![
            ("name", &self.name),
            ("organization", &self.organization),
            ("date", &self.date),
            ("link", &self.link),
        ]
    }
}

impl ResumeDocument {
    /// Checks size limits before the document reaches the renderer.
    ///
    /// Returns a message naming the first offending field, e.g.
    /// `experience[2].description exceeds 10000 characters`.
    pub fn validate(&self) -> Result<(), String> {
        check_fields("personal", &self.personal)?;
        check_length("summary", &self.summary)?;
        check_section("skills", &self.skills)?;
        check_section("experience", &self.experience)?;
        check_section("education", &self.education)?;
        check_section("projects", &self.projects)?;
        check_section("certifications", &self.certifications)?;
        Ok(())
    }
}

fn check_section<T: TextFields>(section: &str, entries: &[T]) -> Result<(), String> {
    if entries.len() > MAX_SECTION_ENTRIES {
        return Err(format!(
            "{section} has {} entries (maximum {MAX_SECTION_ENTRIES})",
            entries.len()
        ));
    }
    for (i, entry) in entries.iter().enumerate() {
        check_fields(&format!("{section}[{i}]"), entry)?;
    }
    Ok(())
}

fn check_fields<T: TextFields>(prefix: &str, record: &T) -> Result<(), String> {
    for (key, value) in record.text_fields() {
        check_length(&format!("{prefix}.{key}"), value)?;
    }
    Ok(())
}

fn check_length(label: &str, value: &Option<String>) -> Result<(), String> {
    match value {
        Some(s) if s.chars().count() > MAX_FIELD_CHARS => Err(format!(
            "{label} exceeds {MAX_FIELD_CHARS} characters"
        )),
        _ => Ok(()),
    }
}
