//! Knowledge base domain model.
//!
//! Admin-authored records destined for the hosted `knowledge_entries`
//! table. Entries are constructed from form input, inserted once, and
//! never read back or edited by this application.

use serde::{Deserialize, Serialize};

/// A single knowledge base record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl KnowledgeEntry {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            tags,
        }
    }
}

/// Splits a comma-separated tag string into trimmed tags.
///
/// The split is unconditional: an empty input yields a single empty
/// string, and empty segments between commas are kept. Observed upstream
/// behavior, preserved as-is.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// The fixed sample entries offered by the admin surface's seeding action,
/// in insertion order.
pub fn sample_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "What are the requirements for an F-1 student visa in the USA?",
            "To obtain an F-1 student visa for the USA, you need: 1) An acceptance letter from a SEVP-approved school, 2) Form I-20 from your school, 3) Proof of financial support, 4) Valid passport, 5) Completed DS-160 form, 6) Visa application fee payment, 7) Strong ties to your home country. You must also attend a visa interview at a U.S. embassy or consulate.",
            "USA",
            vec!["visa".into(), "F-1".into(), "requirements".into()],
        ),
        KnowledgeEntry::new(
            "How much bank balance is required for a UK student visa?",
            "For a UK student visa, you must show enough money to cover your tuition fees and living costs. You need to show living costs of £1,334 per month for courses in London or £1,023 per month for courses outside London, for up to 9 months. This is in addition to your first year's tuition fees. The funds must be held in your account for at least 28 consecutive days.",
            "UK",
            vec!["visa".into(), "finances".into(), "requirements".into()],
        ),
        KnowledgeEntry::new(
            "What is the post-study work visa duration in Canada?",
            "In Canada, the Post-Graduation Work Permit (PGWP) duration depends on your study program length. For programs 8 months to 2 years, you can get a PGWP equal to your program length. For programs 2 years or longer, you can get a 3-year PGWP. The minimum program length requirement is 8 months, and you must have studied full-time.",
            "Canada",
            vec!["PGWP".into(), "work permit".into(), "post-graduation".into()],
        ),
    ]
}
