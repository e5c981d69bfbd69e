//! Topical domains used to route unanswered questions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A topical category with exactly one responsible responder.
///
/// Declaration order is also the classifier's tie-break priority:
/// when several domains share the highest keyword score, the one
/// declared first wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Domain {
    Admission,
    Scholarship,
    /// Fallback when no keyword matches
    #[default]
    #[serde(rename = "Student Affairs", alias = "StudentAffairs")]
    StudentAffairs,
    Academics,
    Migration,
}

impl Domain {
    /// All domains in priority (declaration) order.
    pub const ALL: [Domain; 5] = [
        Domain::Admission,
        Domain::Scholarship,
        Domain::StudentAffairs,
        Domain::Academics,
        Domain::Migration,
    ];

    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Admission => "Admission",
            Domain::Scholarship => "Scholarship",
            Domain::StudentAffairs => "Student Affairs",
            Domain::Academics => "Academics",
            Domain::Migration => "Migration",
        }
    }

    /// Keyword strings whose occurrences count toward this domain.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Domain::Admission => &[
                "admission",
                "admit",
                "apply",
                "form",
                "test",
                "document",
                "verification",
                "eligibility",
                "deadline",
            ],
            Domain::Scholarship => &[
                "scholarship",
                "financial aid",
                "grant",
                "funding",
                "tuition",
                "discount",
                "fee waiver",
            ],
            Domain::StudentAffairs => &[
                "event",
                "club",
                "extracurricular",
                "activity",
                "engagement",
                "student life",
                "hostel",
                "facility",
            ],
            Domain::Academics => &[
                "exam",
                "course",
                "grade",
                "attendance",
                "syllabus",
                "result",
                "academic",
                "lecture",
                "assignment",
            ],
            Domain::Migration => &[
                "migration",
                "transfer",
                "relocation",
                "visa",
                "immigration",
                "international",
                "abroad",
            ],
        }
    }

    /// Default responder name for this domain
    pub fn default_responder(&self) -> &'static str {
        match self {
            Domain::Admission => "Dr Gohar",
            Domain::Scholarship => "Dr Naeem",
            Domain::StudentAffairs => "Sir Sibtual Hassan",
            Domain::Academics => "Teacher Kinza",
            Domain::Migration => "Dr Asim Zeb",
        }
    }

    /// Position in the priority order (0 = highest priority)
    pub fn priority(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "admission" => Ok(Domain::Admission),
            "scholarship" => Ok(Domain::Scholarship),
            "studentaffairs" => Ok(Domain::StudentAffairs),
            "academics" => Ok(Domain::Academics),
            "migration" => Ok(Domain::Migration),
            _ => Err(DomainError::UnknownDomain(s.to_string())),
        }
    }
}
