//! Selection state
//!
//! The cascading class → subject → chapter → sub-topic picker. Changing an
//! upper level clears everything below it; rejected input leaves the state
//! untouched.

use copilot_core::{
    chat_scope, group_chapters, Catalog, Chapter, GenerationRequest, OutputKind,
};

/// Rejected selection input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Unknown class: {0}")]
    UnknownGrade(String),

    #[error("Unknown subject for {grade}: {subject}")]
    UnknownSubject { grade: String, subject: String },

    #[error("No chapter {0} in this subject")]
    UnknownChapter(String),

    #[error("Chapter index {0} is out of range")]
    ChapterOutOfRange(usize),

    #[error("Sub-topic index {0} is out of range")]
    SubTopicOutOfRange(usize),

    #[error("No sub-topic \"{0}\" in this chapter")]
    UnknownSubTopic(String),

    #[error("Choose a {0} first")]
    Missing(&'static str),
}

/// Current picker state
#[derive(Debug, Clone)]
pub struct Selection<'c> {
    catalog: &'c Catalog,
    grade: Option<String>,
    subject: Option<String>,
    chapter: Option<usize>,
    sub_topic: Option<usize>,
    output_kind: OutputKind,
    focus: Option<String>,
}

impl<'c> Selection<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            grade: None,
            subject: None,
            chapter: None,
            sub_topic: None,
            output_kind: OutputKind::default(),
            focus: None,
        }
    }

    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn output_kind(&self) -> OutputKind {
        self.output_kind
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn set_grade(&mut self, grade: &str) -> Result<(), SelectionError> {
        if !self.catalog.grades().contains(&grade) {
            return Err(SelectionError::UnknownGrade(grade.to_string()));
        }
        self.grade = Some(grade.to_string());
        self.subject = None;
        self.chapter = None;
        self.sub_topic = None;
        Ok(())
    }

    pub fn set_subject(&mut self, subject: &str) -> Result<(), SelectionError> {
        let grade = self.grade.as_deref().ok_or(SelectionError::Missing("class"))?;
        if !self.catalog.subjects_for(grade).contains(&subject) {
            return Err(SelectionError::UnknownSubject {
                grade: grade.to_string(),
                subject: subject.to_string(),
            });
        }
        self.subject = Some(subject.to_string());
        self.chapter = None;
        self.sub_topic = None;
        Ok(())
    }

    /// Select by position in [`Selection::chapters`]
    pub fn set_chapter(&mut self, index: usize) -> Result<(), SelectionError> {
        self.require_subject()?;
        if index >= self.chapters().len() {
            return Err(SelectionError::ChapterOutOfRange(index));
        }
        self.chapter = Some(index);
        self.sub_topic = None;
        Ok(())
    }

    /// Select by chapter number (e.g. "1", "H2")
    pub fn set_chapter_number(&mut self, number: &str) -> Result<(), SelectionError> {
        self.require_subject()?;
        let index = self
            .chapters()
            .iter()
            .position(|c| c.number == number)
            .ok_or_else(|| SelectionError::UnknownChapter(number.to_string()))?;
        self.set_chapter(index)
    }

    /// `None` means the entire chapter
    pub fn set_sub_topic(&mut self, index: Option<usize>) -> Result<(), SelectionError> {
        let chapter = self.chapter().ok_or(SelectionError::Missing("chapter"))?;
        if let Some(i) = index {
            if i >= chapter.sub_topics.len() {
                return Err(SelectionError::SubTopicOutOfRange(i));
            }
        }
        self.sub_topic = index;
        Ok(())
    }

    /// Select a sub-topic by name (case-insensitive) or 1-based position
    pub fn set_sub_topic_named(&mut self, wanted: &str) -> Result<(), SelectionError> {
        let chapter = self.chapter().ok_or(SelectionError::Missing("chapter"))?;
        let wanted = wanted.trim();
        let index = chapter
            .sub_topics
            .iter()
            .position(|t| t.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                wanted
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=chapter.sub_topics.len()).contains(n))
                    .map(|n| n - 1)
            })
            .ok_or_else(|| SelectionError::UnknownSubTopic(wanted.to_string()))?;
        self.set_sub_topic(Some(index))
    }

    pub fn set_output_kind(&mut self, kind: OutputKind) {
        self.output_kind = kind;
    }

    /// Blank focus text clears it
    pub fn set_focus(&mut self, focus: &str) {
        let focus = focus.trim();
        self.focus = (!focus.is_empty()).then(|| focus.to_string());
    }

    pub fn available_subjects(&self) -> &'static [&'static str] {
        self.grade
            .as_deref()
            .map(|g| self.catalog.subjects_for(g))
            .unwrap_or(&[])
    }

    pub fn chapters(&self) -> &'c [Chapter] {
        let catalog = self.catalog;
        match (self.grade.as_deref(), self.subject.as_deref()) {
            (Some(grade), Some(subject)) => catalog.chapters(grade, subject),
            _ => &[],
        }
    }

    /// Chapters grouped by book (split only for Social Science)
    pub fn grouped_chapters(&self) -> Vec<(String, Vec<&'c Chapter>)> {
        match self.subject.as_deref() {
            Some(subject) => group_chapters(subject, self.chapters()),
            None => Vec::new(),
        }
    }

    pub fn chapter(&self) -> Option<&'c Chapter> {
        self.chapter.and_then(|i| self.chapters().get(i))
    }

    pub fn available_sub_topics(&self) -> &'c [String] {
        self.chapter().map(|c| c.sub_topics.as_slice()).unwrap_or(&[])
    }

    pub fn sub_topic(&self) -> Option<&'c str> {
        self.sub_topic
            .and_then(|i| self.available_sub_topics().get(i))
            .map(String::as_str)
    }

    /// Request for the current state, or `None` until a chapter is chosen
    pub fn to_request(&self) -> Option<GenerationRequest> {
        let chapter = self.chapter()?;
        let mut request = GenerationRequest::new(
            self.grade.clone()?,
            self.subject.clone()?,
            chapter.clone(),
            self.output_kind,
        );
        if let Some(sub_topic) = self.sub_topic() {
            request = request.with_sub_topic(sub_topic);
        }
        if let Some(focus) = &self.focus {
            request = request.with_focus(focus.clone());
        }
        Some(request)
    }

    pub fn chat_scope(&self) -> Option<String> {
        let chapter = self.chapter()?;
        Some(chat_scope(self.grade.as_deref()?, self.subject.as_deref()?, chapter))
    }

    fn require_subject(&self) -> Result<(), SelectionError> {
        if self.subject.is_none() {
            return Err(SelectionError::Missing("subject"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn science_9() -> Selection<'static> {
        let mut s = Selection::new(Catalog::builtin());
        s.set_grade("Class 9").unwrap();
        s.set_subject("Science").unwrap();
        s
    }

    #[test]
    fn test_no_request_without_chapter() {
        let s = science_9();
        assert!(s.to_request().is_none());
        assert!(s.chat_scope().is_none());
    }

    #[test]
    fn test_full_selection_builds_request() {
        let mut s = science_9();
        s.set_chapter_number("1").unwrap();
        s.set_sub_topic(Some(3)).unwrap();
        s.set_output_kind(OutputKind::MockQuestions);
        s.set_focus("  numericals ");

        let request = s.to_request().unwrap();
        assert_eq!(request.grade_level, "Class 9");
        assert_eq!(request.chapter.name, "Matter in Our Surroundings");
        assert_eq!(request.sub_topic.as_deref(), Some("Evaporation"));
        assert_eq!(request.output_kind, OutputKind::MockQuestions);
        assert_eq!(request.focus_areas.as_deref(), Some("numericals"));
        assert_eq!(
            s.chat_scope().unwrap(),
            "Science: Matter in Our Surroundings (Class 9)"
        );
    }

    #[test]
    fn test_changing_grade_clears_below() {
        let mut s = science_9();
        s.set_chapter(0).unwrap();
        s.set_sub_topic(Some(0)).unwrap();

        s.set_grade("Class 10").unwrap();
        assert_eq!(s.subject(), None);
        assert!(s.chapter().is_none());
        assert!(s.sub_topic().is_none());
    }

    #[test]
    fn test_changing_subject_clears_chapter() {
        let mut s = science_9();
        s.set_chapter(0).unwrap();
        s.set_subject("Mathematics").unwrap();
        assert!(s.chapter().is_none());
    }

    #[test]
    fn test_changing_chapter_clears_sub_topic() {
        let mut s = science_9();
        s.set_chapter(0).unwrap();
        s.set_sub_topic(Some(1)).unwrap();
        s.set_chapter(1).unwrap();
        assert!(s.sub_topic().is_none());
    }

    #[test]
    fn test_rejections_leave_state() {
        let mut s = science_9();
        s.set_chapter(0).unwrap();

        assert_eq!(
            s.set_grade("Class 12"),
            Err(SelectionError::UnknownGrade("Class 12".to_string()))
        );
        assert!(matches!(
            s.set_subject("Astrology"),
            Err(SelectionError::UnknownSubject { .. })
        ));
        assert_eq!(s.set_chapter(99), Err(SelectionError::ChapterOutOfRange(99)));
        assert_eq!(s.set_sub_topic(Some(99)), Err(SelectionError::SubTopicOutOfRange(99)));

        assert_eq!(s.grade(), Some("Class 9"));
        assert_eq!(s.subject(), Some("Science"));
        assert_eq!(s.chapter().map(|c| c.number.as_str()), Some("1"));
    }

    #[test]
    fn test_subject_requires_grade() {
        let mut s = Selection::new(Catalog::builtin());
        assert_eq!(s.set_subject("Science"), Err(SelectionError::Missing("class")));
        assert!(s.available_subjects().is_empty());
    }

    #[test]
    fn test_social_science_grouping() {
        let mut s = Selection::new(Catalog::builtin());
        s.set_grade("Class 9").unwrap();
        s.set_subject("Social Science").unwrap();

        let groups = s.grouped_chapters();
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels.first(), Some(&"History"));
        assert!(labels.contains(&"Geography"));
    }

    #[test]
    fn test_sub_topic_by_name_or_position() {
        let mut s = science_9();
        s.set_chapter_number("1").unwrap();

        s.set_sub_topic_named("change of state").unwrap();
        assert_eq!(s.sub_topic(), Some("Change of State"));

        s.set_sub_topic_named("1").unwrap();
        assert_eq!(s.sub_topic(), Some("Physical Nature of Matter"));

        assert_eq!(
            s.set_sub_topic_named("Plasma"),
            Err(SelectionError::UnknownSubTopic("Plasma".to_string()))
        );
        assert_eq!(s.sub_topic(), Some("Physical Nature of Matter"));
    }

    #[test]
    fn test_blank_focus_is_absent() {
        let mut s = science_9();
        s.set_chapter(0).unwrap();
        s.set_focus("   ");
        assert_eq!(s.to_request().unwrap().focus_areas, None);
    }
}
