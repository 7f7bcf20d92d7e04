//! Built-in seed data: the civics question bank and the N-400 document
//! checklist.

mod civics;

use crate::types::{CivicsQuestion, Document, DocumentMeta, DocumentStatus, UserSettings};
use civics::CIVICS_2008;

/// `(id, name, required, notes, expiry, issuer)`
const CHECKLIST: &[(&str, &str, bool, &str, &str, &str)] = &[
    ("d1", "Permanent Resident Card (Green Card)", true, "Front & Back copy - Current card", "", "USCIS"),
    ("d2", "Driver's License / State ID", true, "Current and valid government-issued photo ID", "", "DMV"),
    ("d3", "All Passports (Current & Expired)", true, "All passports held during the statutory period", "", ""),
    ("d4", "Marriage Certificate", false, "If applying based on marriage to U.S. citizen", "N/A", ""),
    ("d5", "Divorce/Annulment Decrees", false, "For all prior marriages (if applicable)", "N/A", ""),
    ("d6", "Tax Transcripts (5 Years)", true, "IRS Form 1040 transcripts or returns for past 5 years", "N/A", "IRS"),
    ("d7", "Employment History Records", false, "W-2s, pay stubs, or letters from employers for past 5 years", "N/A", ""),
    ("d8", "Travel Records", false, "Records of all trips outside the U.S. during statutory period", "N/A", ""),
    ("d9", "Address History", false, "Documentation of all addresses for past 5 years", "N/A", ""),
    ("d10", "Court/Arrest Records", false, "If applicable - certified copies of all records", "N/A", ""),
    ("d11", "Selective Service Registration", false, "For males who were 18-25 in the U.S.", "N/A", "SSS"),
    ("d12", "Child Support Documentation", false, "If applicable - proof of compliance with support orders", "N/A", ""),
];

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// The 2008 civics question bank, ordered by id.
pub fn default_questions() -> Vec<CivicsQuestion> {
    CIVICS_2008
        .iter()
        .map(|&(id, question, answer, section)| CivicsQuestion {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            section: section.to_string(),
        })
        .collect()
}

/// The default document checklist, every item `missing`.
pub fn default_documents() -> Vec<Document> {
    CHECKLIST
        .iter()
        .map(|&(id, name, required, notes, expiry, issuer)| Document {
            id: id.to_string(),
            name: name.to_string(),
            status: DocumentStatus::Missing,
            required,
            notes: non_empty(notes),
            meta: DocumentMeta {
                expiry: non_empty(expiry),
                issuer: non_empty(issuer),
                location: None,
            },
            parent_id: None,
            is_custom: false,
            submitted_to_uscis: None,
        })
        .collect()
}

pub fn default_settings() -> UserSettings {
    UserSettings::default()
}
