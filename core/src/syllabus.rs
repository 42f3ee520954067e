//! Syllabus catalog
//!
//! Static class → subject → chapter hierarchy for the NCERT Class 9/10
//! syllabus. Built once and never mutated.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Grade levels offered by the catalog
pub const CLASSES: &[&str] = &["Class 9", "Class 10"];

/// Subjects offered for every grade level
pub const SUBJECTS: &[&str] = &[
    "Science",
    "Mathematics",
    "Social Science",
    "English Language & Literature",
    "Hindi Course A",
    "Sanskrit",
    "Artificial Intelligence (417)",
];

/// Content-type labels accepted for admin uploads
pub const CONTENT_TYPES: &[&str] = &[
    "Question Bank",
    "Notes",
    "MCQs",
    "Mind Map",
    "Revision Notes",
];

/// Group label used when a chapter carries none
pub const UNGROUPED_LABEL: &str = "Others";

/// Subject whose chapters are presented grouped by book
pub const GROUPED_SUBJECT: &str = "Social Science";

/// One syllabus chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter id, unique within a subject (e.g. "1", "H2")
    pub number: String,
    pub name: String,
    /// Subdivision such as "History" or "Geography"
    #[serde(rename = "book", default, skip_serializing_if = "Option::is_none")]
    pub group_label: Option<String>,
    pub key_terms: Vec<String>,
    #[serde(default)]
    pub sub_topics: Vec<String>,
}

impl Chapter {
    /// Display form used by pickers: `"<number>: <name>"`
    pub fn title(&self) -> String {
        format!("{}: {}", self.number, self.name)
    }
}

/// Chapters of one subject within one grade level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusEntry {
    #[serde(rename = "class")]
    pub grade_level: String,
    pub subject: String,
    pub chapters: Vec<Chapter>,
}

/// Read-only syllabus catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SyllabusEntry>,
}

impl Catalog {
    /// Build a catalog from arbitrary entries
    pub fn new(entries: Vec<SyllabusEntry>) -> Self {
        Self { entries }
    }

    /// The built-in NCERT catalog (process-wide, built on first use)
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog::new(builtin_entries()))
    }

    pub fn entries(&self) -> &[SyllabusEntry] {
        &self.entries
    }

    /// Grade levels, in display order
    pub fn grades(&self) -> &'static [&'static str] {
        CLASSES
    }

    /// Subjects offered for a grade (empty for unknown grades)
    pub fn subjects_for(&self, grade_level: &str) -> &'static [&'static str] {
        if CLASSES.contains(&grade_level) {
            SUBJECTS
        } else {
            &[]
        }
    }

    /// Entry for a grade/subject pair, if the catalog has chapters for it
    pub fn entry(&self, grade_level: &str, subject: &str) -> Option<&SyllabusEntry> {
        self.entries
            .iter()
            .find(|e| e.grade_level == grade_level && e.subject == subject)
    }

    /// Chapters for a grade/subject pair (empty when not catalogued)
    pub fn chapters(&self, grade_level: &str, subject: &str) -> &[Chapter] {
        self.entry(grade_level, subject)
            .map(|e| e.chapters.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a chapter by its number
    pub fn chapter(&self, grade_level: &str, subject: &str, number: &str) -> Option<&Chapter> {
        self.chapters(grade_level, subject)
            .iter()
            .find(|c| c.number == number)
    }
}

/// Group chapters by their group label, preserving first-appearance order.
///
/// Only the grouped subject is split; every other subject yields a single
/// group holding all chapters under [`UNGROUPED_LABEL`].
pub fn group_chapters<'a>(subject: &str, chapters: &'a [Chapter]) -> Vec<(String, Vec<&'a Chapter>)> {
    if subject != GROUPED_SUBJECT {
        if chapters.is_empty() {
            return Vec::new();
        }
        return vec![(UNGROUPED_LABEL.to_string(), chapters.iter().collect())];
    }

    let mut groups: Vec<(String, Vec<&Chapter>)> = Vec::new();
    for chapter in chapters {
        let label = chapter.group_label.as_deref().unwrap_or(UNGROUPED_LABEL);
        match groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, members)) => members.push(chapter),
            None => groups.push((label.to_string(), vec![chapter])),
        }
    }
    groups
}

fn chapter(number: &str, name: &str, key_terms: &[&str], sub_topics: &[&str]) -> Chapter {
    Chapter {
        number: number.to_string(),
        name: name.to_string(),
        group_label: None,
        key_terms: key_terms.iter().map(|s| s.to_string()).collect(),
        sub_topics: sub_topics.iter().map(|s| s.to_string()).collect(),
    }
}

fn grouped(book: &str, number: &str, name: &str, key_terms: &[&str]) -> Chapter {
    Chapter {
        group_label: Some(book.to_string()),
        ..chapter(number, name, key_terms, &[])
    }
}

fn entry(grade_level: &str, subject: &str, chapters: Vec<Chapter>) -> SyllabusEntry {
    SyllabusEntry {
        grade_level: grade_level.to_string(),
        subject: subject.to_string(),
        chapters,
    }
}

fn builtin_entries() -> Vec<SyllabusEntry> {
    vec![
        entry(
            "Class 9",
            "Science",
            vec![
                chapter(
                    "1",
                    "Matter in Our Surroundings",
                    &["States of matter", "Latent heat", "Evaporation"],
                    &[
                        "Physical Nature of Matter",
                        "States of Matter",
                        "Change of State",
                        "Evaporation",
                    ],
                ),
                chapter(
                    "2",
                    "Is Matter Around Us Pure",
                    &["Mixture", "Colloids", "Concentration"],
                    &[
                        "Mixtures",
                        "Solutions",
                        "Separating Components",
                        "Physical and Chemical Changes",
                    ],
                ),
                chapter(
                    "5",
                    "The Fundamental Unit of Life",
                    &["Cell", "Organelles", "Osmosis"],
                    &[
                        "Cell Discovery",
                        "Plasma Membrane",
                        "Nucleus",
                        "Cell Organelles",
                    ],
                ),
            ],
        ),
        entry(
            "Class 9",
            "Social Science",
            vec![
                grouped(
                    "History",
                    "H1",
                    "The French Revolution",
                    &["Estates General", "Bastille", "Jacobins"],
                ),
                grouped(
                    "History",
                    "H2",
                    "Socialism in Europe and the Russian Revolution",
                    &["Tsar", "Bolsheviks", "February Revolution"],
                ),
                grouped(
                    "Geography",
                    "G1",
                    "India: Size and Location",
                    &["Standard Meridian", "Latitudinal Extent"],
                ),
                grouped(
                    "Geography",
                    "G2",
                    "Physical Features of India",
                    &["Himalayas", "Northern Plains", "Peninsular Plateau"],
                ),
                grouped(
                    "Civics",
                    "C1",
                    "What is Democracy? Why Democracy?",
                    &["Universal Adult Franchise", "Accountability"],
                ),
                grouped(
                    "Economics",
                    "E1",
                    "The Story of Village Palampur",
                    &["Factors of Production", "Multiple Cropping"],
                ),
            ],
        ),
        entry(
            "Class 10",
            "Mathematics",
            vec![
                chapter(
                    "1",
                    "Real Numbers",
                    &["Fundamental Theorem of Arithmetic", "Irrationality"],
                    &[
                        "Fundamental Theorem of Arithmetic",
                        "Revisiting Irrational Numbers",
                    ],
                ),
                chapter(
                    "4",
                    "Quadratic Equations",
                    &["Roots", "Discriminant", "Nature of Roots"],
                    &[
                        "Quadratic Equations",
                        "Solution by Factorisation",
                        "Nature of Roots",
                    ],
                ),
                chapter(
                    "6",
                    "Triangles",
                    &["Similarity", "BPT", "Pythagoras Theorem"],
                    &[
                        "Similar Figures",
                        "Similarity of Triangles",
                        "Criteria for Similarity",
                    ],
                ),
            ],
        ),
        entry(
            "Class 10",
            "Social Science",
            vec![
                grouped(
                    "History",
                    "H1",
                    "Nationalism in Europe",
                    &["Liberalism", "Treaty of Vienna"],
                ),
                grouped(
                    "History",
                    "H2",
                    "Nationalism in India",
                    &["Satyagraha", "Non-Cooperation", "Civil Disobedience"],
                ),
                grouped(
                    "Geography",
                    "G1",
                    "Resources and Development",
                    &["Sustainability", "Soil Erosion"],
                ),
                grouped(
                    "Civics",
                    "C1",
                    "Power Sharing",
                    &["Belgium Model", "Majoritarianism"],
                ),
                grouped(
                    "Economics",
                    "E1",
                    "Development",
                    &["PCI", "HDR", "Sustainable Development"],
                ),
            ],
        ),
    ]
}
