//! Prompt builder
//!
//! Turns a [`GenerationRequest`] plus any matching uploads into the user
//! prompt sent to the model. Pure: the same inputs always yield the same
//! string.

use crate::request::{GenerationRequest, OutputKind};
use crate::syllabus::Chapter;
use crate::uploads::UploadRecord;

/// Fixed system instruction for content generation and chat
pub const SYSTEM_INSTRUCTION: &str = "You are an expert CBSE teacher specializing in Classes 9-10.
Strictly follow NCERT books.
Use exam-oriented terminology (e.g., \"marking points\", \"key definitions\").
Avoid hallucination. If data is not in the chapter context, state you don't know based on NCERT.
Tone: Formal, encouraging, and structured.";

/// Sub-topic marker when the whole chapter is requested
pub const ENTIRE_CHAPTER: &str = "Entire Chapter";

/// Focus marker when the user gave none
pub const DEFAULT_FOCUS: &str = "Comprehensive NCERT coverage";

/// Header introducing admin-uploaded context
pub const UPLOAD_CONTEXT_HEADER: &str = "Context from internal repository:";

/// Output kind → instruction block
pub const INSTRUCTIONS: [(OutputKind, &str); 5] = [
    (
        OutputKind::FullExplanation,
        "Generate a complete concept clarity section. Include:
1. Conceptual foundation.
2. Detailed breakdown of sub-topics.
3. NCERT-style diagrams described in text.
4. Crucial definitions.
5. Application in daily life.",
    ),
    (
        OutputKind::Summary,
        "Generate an exam-ready summary with bullet points, high-weightage keywords, and \"Master Tips\" for revision.",
    ),
    (
        OutputKind::MindMap,
        "Generate a hierarchical text mind-map. Root is the chapter/subtopic, branched into major themes, then definitions/examples.",
    ),
    (
        OutputKind::RevisionPlan,
        "Generate a 3-Day Rapid Revision Plan:
- Day 1: Deep dive into concepts & NCERT reading.
- Day 2: Problem solving, diagrams, and formula practice.
- Day 3: Mock Test & self-assessment using spaced repetition logic.",
    ),
    (
        OutputKind::MockQuestions,
        "Generate:
- 5 MCQs (1M)
- 3 VSAQ (2M)
- 2 LAQ (5M)
- 1 Case-Study (4M)
Provide a Detailed Marking Scheme with points for each answer.",
    ),
];

/// Instruction block for an output kind
pub fn instruction_for(kind: OutputKind) -> &'static str {
    INSTRUCTIONS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, text)| *text)
        .unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Render the upload context block, or an empty string when there is none
///
/// Upload content is passed through verbatim.
pub fn render_upload_context(uploads: &[UploadRecord]) -> String {
    if uploads.is_empty() {
        return String::new();
    }

    let mut block = String::from(UPLOAD_CONTEXT_HEADER);
    for upload in uploads {
        block.push('\n');
        block.push_str(&format!("[{}] {}", upload.content_type, upload.content));
    }
    block
}

/// Build the user prompt for a generation request
pub fn build(request: &GenerationRequest, uploads: &[UploadRecord]) -> String {
    let chapter = &request.chapter;
    let sub_topic = non_empty(request.sub_topic.as_deref()).unwrap_or(ENTIRE_CHAPTER);
    let focus = non_empty(request.focus_areas.as_deref()).unwrap_or(DEFAULT_FOCUS);

    let mut prompt = String::new();
    prompt.push_str(&format!("Subject: {}\n", request.subject));
    prompt.push_str(&format!("Class: {}\n", request.grade_level));
    prompt.push_str(&format!("Chapter: {} - {}\n", chapter.number, chapter.name));
    prompt.push_str(&format!("Sub-topic: {}\n", sub_topic));
    prompt.push_str(&format!("Key Terms: {}\n", chapter.key_terms.join(", ")));
    prompt.push_str(&format!("Focus: {}\n", focus));
    prompt.push_str(&format!("Output Mode: {}\n", request.output_kind.label()));

    let context = render_upload_context(uploads);
    if !context.is_empty() {
        prompt.push('\n');
        prompt.push_str(&context);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(instruction_for(request.output_kind));
    prompt
}

/// Chat scope description: `"<subject>: <chapter> (<class>)"`
pub fn chat_scope(grade_level: &str, subject: &str, chapter: &Chapter) -> String {
    format!("{}: {} ({})", subject, chapter.name, grade_level)
}

/// System instruction restricting a chat session to one scope
pub fn chat_instruction(scope: &str) -> String {
    format!(
        "{}\nYou are currently in a chat session focusing ONLY on: {}.\nDo not answer questions outside this scope unless they directly relate to the context.",
        SYSTEM_INSTRUCTION, scope
    )
}
