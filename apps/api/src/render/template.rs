//! The fixed resume template.
//!
//! Each section is a step that takes the cursor it starts at and returns the
//! cursor it leaves behind. A section is skipped entirely when it has no
//! content.

use crate::layout::font_metrics::FontStyle;
use crate::models::resume::{
    present, CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, SkillEntry,
};
use crate::render::canvas::{
    Align, Canvas, Cell, Cursor, FlowRun, Footer, Rgb, TextStyle, PAGE_COUNT_ALIAS,
    PAGE_NUMBER_TOKEN,
};
use crate::render::RenderError;

pub const PRIMARY: Rgb = Rgb(27, 60, 83);
pub const SECONDARY: Rgb = Rgb(35, 76, 106);
pub const ACCENT: Rgb = Rgb(69, 104, 130);
pub const MUTED_GREY: Rgb = Rgb(100, 100, 100);
pub const BODY_GREY: Rgb = Rgb(50, 50, 50);
pub const FOOTER_GREY: Rgb = Rgb(128, 128, 128);

pub const NAME_FALLBACK: &str = "Your Name";

const HEADER_BAND_MM: f32 = 50.0;
const NAME_TOP_MM: f32 = 10.0;
const BODY_TOP_MM: f32 = 55.0;
const SEPARATOR: &str = " | ";
const RULE_WIDTH_MM: f32 = 0.2;

/// Section headings in drawing order.
pub const SUMMARY_HEADING: &str = "Professional Summary";
pub const SKILLS_HEADING: &str = "Skills";
pub const EXPERIENCE_HEADING: &str = "Experience";
pub const EDUCATION_HEADING: &str = "Education";
pub const PROJECTS_HEADING: &str = "Projects";
pub const CERTIFICATIONS_HEADING: &str = "Certifications";

fn style(font: FontStyle, size_pt: f32, color: Rgb) -> TextStyle {
    TextStyle::new(font, size_pt, color)
}

pub fn footer() -> Footer {
    Footer {
        text: format!("Page {PAGE_NUMBER_TOKEN}/{PAGE_COUNT_ALIAS}"),
        style: style(FontStyle::Italic, 8.0, FOOTER_GREY),
        offset_from_bottom_mm: 15.0,
        height_mm: 10.0,
    }
}

/// Draws the whole document. Strings are expected to be normalized already.
pub fn draw_resume(
    canvas: &mut Canvas,
    cursor: Cursor,
    doc: &ResumeDocument,
) -> Result<Cursor, RenderError> {
    let mut cursor = draw_header(canvas, cursor, &doc.personal)?;

    if let Some(summary) = present(&doc.summary) {
        cursor = draw_heading(canvas, cursor, SUMMARY_HEADING)?;
        cursor = canvas.paragraph(cursor, 5.0, summary, style(FontStyle::Regular, 10.0, BODY_GREY), Align::Left)?;
    }
    if !doc.skills.is_empty() {
        cursor = draw_heading(canvas, cursor, SKILLS_HEADING)?;
        for skill in &doc.skills {
            cursor = draw_skill(canvas, cursor, skill)?;
        }
    }
    if !doc.experience.is_empty() {
        cursor = draw_heading(canvas, cursor, EXPERIENCE_HEADING)?;
        for entry in &doc.experience {
            cursor = draw_experience(canvas, cursor, entry)?;
        }
    }
    if !doc.education.is_empty() {
        cursor = draw_heading(canvas, cursor, EDUCATION_HEADING)?;
        for entry in &doc.education {
            cursor = draw_education(canvas, cursor, entry)?;
        }
    }
    if !doc.projects.is_empty() {
        cursor = draw_heading(canvas, cursor, PROJECTS_HEADING)?;
        for entry in &doc.projects {
            cursor = draw_project(canvas, cursor, entry)?;
        }
    }
    if !doc.certifications.is_empty() {
        cursor = draw_heading(canvas, cursor, CERTIFICATIONS_HEADING)?;
        for entry in &doc.certifications {
            cursor = draw_certification(canvas, cursor, entry)?;
        }
    }
    Ok(cursor)
}

fn draw_header(canvas: &mut Canvas, cursor: Cursor, personal: &PersonalInfo) -> Result<Cursor, RenderError> {
    let width = canvas.config().width_mm;
    canvas.fill_rect(cursor.page, 0.0, 0.0, width, HEADER_BAND_MM, PRIMARY);

    let name = present(&personal.full_name).unwrap_or(NAME_FALLBACK);
    let mut cursor = canvas.row(
        cursor.at(NAME_TOP_MM),
        10.0,
        &[Cell::new(None, name, style(FontStyle::Bold, 24.0, Rgb::WHITE), Align::Center)],
    )?;

    let contact: Vec<&str> = [&personal.email, &personal.phone, &personal.location]
        .into_iter()
        .filter_map(present)
        .collect();
    // An empty contact line still takes its 6 mm.
    cursor = if contact.is_empty() {
        cursor.advance(6.0)
    } else {
        canvas.paragraph(
            cursor,
            6.0,
            &contact.join(SEPARATOR),
            style(FontStyle::Regular, 10.0, Rgb::WHITE),
            Align::Center,
        )?
    };

    let links: Vec<String> = [
        ("LinkedIn", &personal.linkedin),
        ("GitHub", &personal.github),
        ("Portfolio", &personal.portfolio),
    ]
    .into_iter()
    .filter_map(|(label, value)| present(value).map(|v| format!("{label}: {v}")))
    .collect();
    if !links.is_empty() {
        cursor = canvas.paragraph(
            cursor,
            6.0,
            &links.join(SEPARATOR),
            style(FontStyle::Regular, 9.0, Rgb::WHITE),
            Align::Center,
        )?;
    }

    Ok(cursor.at(BODY_TOP_MM))
}

fn draw_heading(canvas: &mut Canvas, cursor: Cursor, title: &str) -> Result<Cursor, RenderError> {
    let cursor = canvas.row(
        cursor.advance(5.0),
        10.0,
        &[Cell::new(None, title, style(FontStyle::Bold, 14.0, SECONDARY), Align::Left)],
    )?;
    let (left, right) = (canvas.config().margin_left_mm, canvas.config().right_edge_mm());
    canvas.rule(cursor, left, right, RULE_WIDTH_MM, ACCENT);
    Ok(cursor.advance(2.0))
}

fn draw_skill(canvas: &mut Canvas, cursor: Cursor, skill: &SkillEntry) -> Result<Cursor, RenderError> {
    let (Some(category), Some(items)) = (present(&skill.category), present(&skill.items)) else {
        return Ok(cursor);
    };
    let label = format!("{category}: ");
    let cursor = canvas.flow(
        cursor,
        5.0,
        10.0,
        &[
            FlowRun { font: FontStyle::Bold, color: SECONDARY, text: &label },
            FlowRun { font: FontStyle::Regular, color: Rgb::BLACK, text: items },
        ],
    )?;
    Ok(cursor.advance(6.0))
}

fn draw_experience(canvas: &mut Canvas, cursor: Cursor, entry: &ExperienceEntry) -> Result<Cursor, RenderError> {
    let title = present(&entry.title).unwrap_or_default();
    let dates = date_range(present(&entry.start_date), present(&entry.end_date));
    let mut cursor = canvas.row(
        cursor,
        6.0,
        &[
            Cell::new(Some(130.0), title, style(FontStyle::Bold, 11.0, PRIMARY), Align::Left),
            Cell::new(None, &dates, style(FontStyle::Italic, 10.0, MUTED_GREY), Align::Right),
        ],
    )?;

    let org: Vec<&str> = [&entry.company, &entry.location]
        .into_iter()
        .filter_map(present)
        .collect();
    if !org.is_empty() {
        cursor = canvas.row(
            cursor,
            5.0,
            &[Cell::new(None, &org.join(SEPARATOR), style(FontStyle::Bold, 10.0, SECONDARY), Align::Left)],
        )?;
    }

    if let Some(description) = present(&entry.description) {
        cursor = canvas.paragraph(cursor, 5.0, description, style(FontStyle::Regular, 10.0, BODY_GREY), Align::Left)?;
    }
    Ok(cursor.advance(3.0))
}

/// `"start - end"`, or empty when neither date is present.
fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (None, None) => String::new(),
        (start, end) => format!("{} - {}", start.unwrap_or_default(), end.unwrap_or_default()),
    }
}

fn draw_education(canvas: &mut Canvas, cursor: Cursor, entry: &EducationEntry) -> Result<Cursor, RenderError> {
    let mut cursor = canvas.row(
        cursor,
        6.0,
        &[
            Cell::new(
                Some(140.0),
                present(&entry.degree).unwrap_or_default(),
                style(FontStyle::Bold, 11.0, PRIMARY),
                Align::Left,
            ),
            Cell::new(
                None,
                present(&entry.year).unwrap_or_default(),
                style(FontStyle::Italic, 10.0, MUTED_GREY),
                Align::Right,
            ),
        ],
    )?;
    if let Some(university) = present(&entry.university) {
        cursor = canvas.row(
            cursor,
            5.0,
            &[Cell::new(None, university, style(FontStyle::Regular, 10.0, SECONDARY), Align::Left)],
        )?;
    }
    if let Some(cgpa) = present(&entry.cgpa) {
        cursor = canvas.row(
            cursor,
            5.0,
            &[Cell::new(None, &format!("CGPA/GPA: {cgpa}"), style(FontStyle::Italic, 9.0, SECONDARY), Align::Left)],
        )?;
    }
    Ok(cursor.advance(2.0))
}

fn draw_project(canvas: &mut Canvas, cursor: Cursor, entry: &ProjectEntry) -> Result<Cursor, RenderError> {
    let mut cursor = canvas.row(
        cursor,
        6.0,
        &[Cell::new(
            None,
            present(&entry.title).unwrap_or_default(),
            style(FontStyle::Bold, 11.0, PRIMARY),
            Align::Left,
        )],
    )?;
    if let Some(stack) = present(&entry.tech_stack) {
        cursor = canvas.row(
            cursor,
            5.0,
            &[Cell::new(None, &format!("Tech Stack: {stack}"), style(FontStyle::Italic, 9.0, ACCENT), Align::Left)],
        )?;
    }
    if let Some(description) = present(&entry.description) {
        cursor = canvas.paragraph(cursor, 5.0, description, style(FontStyle::Regular, 10.0, BODY_GREY), Align::Left)?;
    }
    Ok(cursor.advance(3.0))
}

fn draw_certification(
    canvas: &mut Canvas,
    cursor: Cursor,
    entry: &CertificationEntry,
) -> Result<Cursor, RenderError> {
    let name = Cell::new(
        Some(140.0),
        present(&entry.name).unwrap_or_default(),
        style(FontStyle::Bold, 10.0, PRIMARY),
        Align::Left,
    )
    .with_link(present(&entry.link).filter(|link| is_web_link(link)));
    let date = Cell::new(
        None,
        present(&entry.date).unwrap_or_default(),
        style(FontStyle::Italic, 9.0, MUTED_GREY),
        Align::Right,
    );
    let mut cursor = canvas.row(cursor, 5.0, &[name, date])?;

    if let Some(org) = present(&entry.organization) {
        cursor = canvas.row(
            cursor,
            5.0,
            &[Cell::new(None, org, style(FontStyle::Regular, 9.0, SECONDARY), Align::Left)],
        )?;
    }
    Ok(cursor.advance(2.0))
}

fn is_web_link(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::PT_PER_MM;
    use crate::layout::page::default_page_config;
    use crate::render::canvas::{DrawOp, Page};

    fn layout(doc: &ResumeDocument) -> Vec<Page> {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), Some(footer()));
        draw_resume(&mut canvas, cursor, doc).unwrap();
        canvas.finish()
    }

    fn all_text(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.texts().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_empty_document_has_header_and_no_headings() {
        let pages = layout(&ResumeDocument::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(all_text(&pages), vec!["Your Name", "Page 1/1"]);
        assert!(matches!(
            pages[0].ops[0],
            DrawOp::FillRect { h_mm, color: PRIMARY, .. } if h_mm == 50.0
        ));
    }

    #[test]
    fn test_header_contact_and_links_lines() {
        let mut doc = ResumeDocument::default();
        doc.personal = PersonalInfo {
            full_name: Some("Jane Doe".into()),
            email: Some("jane@gmail.com".into()),
            phone: Some("".into()),
            location: Some("Berlin".into()),
            github: Some("github.com/jane".into()),
            ..Default::default()
        };
        let texts = all_text(&layout(&doc));
        assert_eq!(
            texts,
            vec![
                "Jane Doe",
                "jane@gmail.com | Berlin",
                "GitHub: github.com/jane",
                "Page 1/1",
            ]
        );
    }

    #[test]
    fn test_sections_drawn_in_fixed_order() {
        let doc = ResumeDocument {
            summary: Some("Systems engineer.".into()),
            certifications: vec![CertificationEntry {
                name: Some("CKA".into()),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: Some("BSc".into()),
                ..Default::default()
            }],
            skills: vec![SkillEntry {
                category: Some("Languages".into()),
                items: Some("Rust".into()),
            }],
            ..Default::default()
        };
        let texts = all_text(&layout(&doc));
        let headings: Vec<&str> = texts
            .iter()
            .map(String::as_str)
            .filter(|t| {
                [
                    SUMMARY_HEADING,
                    SKILLS_HEADING,
                    EXPERIENCE_HEADING,
                    EDUCATION_HEADING,
                    PROJECTS_HEADING,
                    CERTIFICATIONS_HEADING,
                ]
                .contains(t)
            })
            .collect();
        assert_eq!(
            headings,
            vec![SUMMARY_HEADING, SKILLS_HEADING, EDUCATION_HEADING, CERTIFICATIONS_HEADING]
        );
    }

    #[test]
    fn test_first_heading_starts_below_band() {
        let doc = ResumeDocument {
            summary: Some("Short.".into()),
            ..Default::default()
        };
        let pages = layout(&doc);
        let rule_y = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rule { y_mm, color, .. } if *color == ACCENT => Some(*y_mm),
                _ => None,
            })
            .unwrap();
        // 55 + 5 gap + 10 heading line
        assert!((rule_y - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_skill_without_items_is_skipped_but_heading_kept() {
        let doc = ResumeDocument {
            skills: vec![SkillEntry {
                category: Some("Tools".into()),
                items: None,
            }],
            ..Default::default()
        };
        let texts = all_text(&layout(&doc));
        assert!(texts.iter().any(|t| t == SKILLS_HEADING));
        assert!(!texts.iter().any(|t| t.starts_with("Tools")));
    }

    #[test]
    fn test_experience_lines() {
        let doc = ResumeDocument {
            experience: vec![
                ExperienceEntry {
                    title: Some("Staff Engineer".into()),
                    company: Some("Acme".into()),
                    location: Some("Remote".into()),
                    start_date: Some("2020".into()),
                    end_date: Some("Present".into()),
                    description: Some("Led the platform team.".into()),
                },
                ExperienceEntry {
                    title: Some("Engineer".into()),
                    company: Some("Initech".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let texts = all_text(&layout(&doc));
        for expected in [
            "Staff Engineer",
            "2020 - Present",
            "Acme | Remote",
            "Led the platform team.",
            "Engineer",
            "Initech",
        ] {
            assert!(texts.iter().any(|t| t == expected), "missing {expected}: {texts:?}");
        }
        assert!(!texts.iter().any(|t| t == " - "));
    }

    #[test]
    fn test_certification_link_only_for_web_urls() {
        let doc = ResumeDocument {
            certifications: vec![
                CertificationEntry {
                    name: Some("AWS SA".into()),
                    link: Some("https://aws.example/verify".into()),
                    ..Default::default()
                },
                CertificationEntry {
                    name: Some("Internal".into()),
                    link: Some("ftp://files.example".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let pages = layout(&doc);
        let links: Vec<&str> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Link { uri, .. } => Some(uri.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(links, vec!["https://aws.example/verify"]);
    }

    #[test]
    fn test_name_only_document_has_header_and_no_headings() {
        let mut doc = ResumeDocument::default();
        doc.personal.full_name = Some("Jane Doe".into());
        let pages = layout(&doc);
        assert_eq!(pages.len(), 1);
        assert_eq!(all_text(&pages), vec!["Jane Doe", "Page 1/1"]);
        assert!(!pages[0].ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn test_links_line_keeps_its_place_without_contact_fields() {
        let mut doc = ResumeDocument::default();
        doc.personal.github = Some("github.com/jane".into());
        let pages = layout(&doc);
        let baseline = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, baseline_mm, .. } if text == "GitHub: github.com/jane" => {
                    Some(*baseline_mm)
                }
                _ => None,
            })
            .unwrap();
        // Name line 10..20, empty contact line 20..26, links line from 26.
        let expected = 26.0 + 3.0 + 0.3 * (9.0 / PT_PER_MM);
        assert!((baseline - expected).abs() < 1e-4, "baseline {baseline}");
    }

    #[test]
    fn test_certification_with_non_url_link_is_plain_text() {
        let doc = ResumeDocument {
            certifications: vec![CertificationEntry {
                name: Some("AWS Cert".into()),
                link: Some("not-a-url".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let pages = layout(&doc);
        assert!(all_text(&pages).iter().any(|t| t == "AWS Cert"));
        assert!(!pages[0].ops.iter().any(|op| matches!(op, DrawOp::Link { .. })));
    }

    #[test]
    fn test_long_document_paginates_with_footers() {
        let doc = ResumeDocument {
            experience: (0..30)
                .map(|i| ExperienceEntry {
                    title: Some(format!("Role {i}")),
                    company: Some("Acme".into()),
                    description: Some("Shipped features and reviewed code. ".repeat(8)),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let pages = layout(&doc);
        assert!(pages.len() > 1);
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            let footer = format!("Page {}/{}", i + 1, total);
            assert!(page.texts().any(|t| t == footer), "page {i} lacks footer");
        }
        let texts = all_text(&pages);
        assert!(texts.iter().any(|t| t == "Role 29"));
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(None, None), "");
        assert_eq!(date_range(Some("2019"), None), "2019 - ");
        assert_eq!(date_range(Some("2019"), Some("2021")), "2019 - 2021");
    }
}
