//! Generation request types
//!
//! A request is built per generation call and never persisted.

use crate::syllabus::Chapter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five study artifacts a user can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    #[serde(rename = "Full Chapter Explanation")]
    FullExplanation,
    #[serde(rename = "Summary")]
    Summary,
    #[serde(rename = "Mind Map")]
    MindMap,
    #[serde(rename = "Daily Revision Plan")]
    RevisionPlan,
    #[serde(rename = "Mock Questions")]
    MockQuestions,
}

impl OutputKind {
    /// All kinds, in picker order
    pub const ALL: [OutputKind; 5] = [
        OutputKind::Summary,
        OutputKind::MindMap,
        OutputKind::RevisionPlan,
        OutputKind::MockQuestions,
        OutputKind::FullExplanation,
    ];

    /// Label shown to the user and sent as "Output Mode"
    pub fn label(self) -> &'static str {
        match self {
            OutputKind::FullExplanation => "Full Chapter Explanation",
            OutputKind::Summary => "Summary",
            OutputKind::MindMap => "Mind Map",
            OutputKind::RevisionPlan => "Daily Revision Plan",
            OutputKind::MockQuestions => "Mock Questions",
        }
    }

    /// Short command-line form
    pub fn slug(self) -> &'static str {
        match self {
            OutputKind::FullExplanation => "explanation",
            OutputKind::Summary => "summary",
            OutputKind::MindMap => "mind-map",
            OutputKind::RevisionPlan => "revision-plan",
            OutputKind::MockQuestions => "mock-questions",
        }
    }
}

impl Default for OutputKind {
    fn default() -> Self {
        OutputKind::Summary
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown output kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output kind: {0}")]
pub struct UnknownOutputKind(pub String);

impl FromStr for OutputKind {
    type Err = UnknownOutputKind;

    /// Accepts the label or the slug, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OutputKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(wanted) || k.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOutputKind(s.to_string()))
    }
}

/// One generation call's inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub grade_level: String,
    pub subject: String,
    pub chapter: Chapter,
    pub sub_topic: Option<String>,
    pub output_kind: OutputKind,
    pub focus_areas: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        grade_level: impl Into<String>,
        subject: impl Into<String>,
        chapter: Chapter,
        output_kind: OutputKind,
    ) -> Self {
        Self {
            grade_level: grade_level.into(),
            subject: subject.into(),
            chapter,
            sub_topic: None,
            output_kind,
            focus_areas: None,
        }
    }

    pub fn with_sub_topic(mut self, sub_topic: impl Into<String>) -> Self {
        self.sub_topic = Some(sub_topic.into());
        self
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus_areas = Some(focus.into());
        self
    }
}
