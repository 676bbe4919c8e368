//! Text normalization applied to every string before layout.
//!
//! The renderer draws with the standard Helvetica fonts, so output text is
//! limited to printable Latin-1. Typographic punctuation maps to its plain
//! equivalent; anything else outside Latin-1 becomes `?`. The pass is
//! idempotent.

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, SkillEntry,
};

/// Substitution for characters the output encoding cannot carry.
pub const REPLACEMENT_CHAR: char = '?';

/// Normalizes a single string.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2022}' | '\u{25CF}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' | '\t' => out.push(' '),
            '\r' => {}
            c if is_encodable(c) => out.push(c),
            _ => out.push(REPLACEMENT_CHAR),
        }
    }
    out
}

/// True for characters the renderer can draw as-is.
pub fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | ' '..='~' | '\u{00A1}'..='\u{00FF}')
}

/// Depth-first, in-place normalization of every string in a value.
pub trait Normalize {
    fn normalize(&mut self);
}

impl Normalize for String {
    fn normalize(&mut self) {
        if !self.chars().all(is_encodable) {
            *self = normalize_text(self);
        }
    }
}

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&mut self) {
        if let Some(value) = self {
            value.normalize();
        }
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&mut self) {
        for item in self.iter_mut() {
            item.normalize();
        }
    }
}

impl Normalize for PersonalInfo {
    fn normalize(&mut self) {
        self.full_name.normalize();
        self.email.normalize();
        self.phone.normalize();
        self.location.normalize();
        self.linkedin.normalize();
        self.github.normalize();
        self.portfolio.normalize();
    }
}

impl Normalize for SkillEntry {
    fn normalize(&mut self) {
        self.category.normalize();
        self.items.normalize();
    }
}

impl Normalize for ExperienceEntry {
    fn normalize(&mut self) {
        self.title.normalize();
        self.company.normalize();
        self.location.normalize();
        self.start_date.normalize();
        self.end_date.normalize();
        self.description.normalize();
    }
}

impl Normalize for EducationEntry {
    fn normalize(&mut self) {
        self.degree.normalize();
        self.university.normalize();
        self.year.normalize();
        self.cgpa.normalize();
    }
}

impl Normalize for ProjectEntry {
    fn normalize(&mut self) {
        self.title.normalize();
        self.tech_stack.normalize();
        self.description.normalize();
    }
}

impl Normalize for CertificationEntry {
    fn normalize(&mut self) {
        self.name.normalize();
        self.organization.normalize();
        self.date.normalize();
        self.link.normalize();
    }
}

impl Normalize for ResumeDocument {
    fn normalize(&mut self) {
        self.personal.normalize();
        self.summary.normalize();
        self.skills.normalize();
        self.experience.normalize();
        self.education.normalize();
        self.projects.normalize();
        self.certifications.normalize();
    }
}

/// Returns a normalized copy of `doc`.
pub fn normalize_document(doc: &ResumeDocument) -> ResumeDocument {
    let mut doc = doc.clone();
    doc.normalize();
    doc
}
