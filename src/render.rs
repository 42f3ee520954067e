//! Display formatter
//!
//! Line-oriented rendering of generated study material. Only the handful of
//! markdown forms the model is asked to produce are recognised; everything
//! else is a paragraph.

use crossterm::style::Stylize;
use regex::Regex;
use std::sync::OnceLock;

/// Classification of one output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    H1(&'a str),
    H2(&'a str),
    H3(&'a str),
    Bullet(&'a str),
    /// Kept verbatim, number included
    Numbered(&'a str),
    Blank,
    Paragraph(&'a str),
}

fn numbered_line() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^\d+\.").expect("numbered-line pattern is valid"))
}

/// Classify a single line
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix("### ") {
        LineKind::H3(rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        LineKind::H2(rest)
    } else if let Some(rest) = line.strip_prefix("# ") {
        LineKind::H1(rest)
    } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        LineKind::Bullet(rest)
    } else if numbered_line().is_match(line) {
        LineKind::Numbered(line)
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Paragraph(line)
    }
}

/// Styled output for a terminal, one output line per input line
pub fn render_terminal(text: &str) -> String {
    text.split('\n')
        .map(|line| match classify(line) {
            LineKind::H1(t) => t.to_uppercase().bold().magenta().to_string(),
            LineKind::H2(t) => t.bold().underlined().to_string(),
            LineKind::H3(t) => t.bold().cyan().to_string(),
            LineKind::Bullet(t) => format!("  {} {}", "•".cyan(), t),
            LineKind::Numbered(t) => format!("  {}", t.bold()),
            LineKind::Blank => String::new(),
            LineKind::Paragraph(t) => t.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unstyled output for files and pipes
pub fn render_plain(text: &str) -> String {
    text.split('\n')
        .map(|line| match classify(line) {
            LineKind::H1(t) => t.to_uppercase(),
            LineKind::H2(t) | LineKind::H3(t) | LineKind::Paragraph(t) => t.to_string(),
            LineKind::Bullet(t) => format!("  • {}", t),
            LineKind::Numbered(t) => format!("  {}", t),
            LineKind::Blank => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(classify("# Matter"), LineKind::H1("Matter"));
        assert_eq!(classify("## States"), LineKind::H2("States"));
        assert_eq!(classify("### Solid"), LineKind::H3("Solid"));
        assert_eq!(classify("#NoSpace"), LineKind::Paragraph("#NoSpace"));
    }

    #[test]
    fn test_bullets_and_numbers() {
        assert_eq!(classify("- Latent heat"), LineKind::Bullet("Latent heat"));
        assert_eq!(classify("* Evaporation"), LineKind::Bullet("Evaporation"));
        assert_eq!(classify("12. Diffusion"), LineKind::Numbered("12. Diffusion"));
        assert_eq!(classify("1.5 kg"), LineKind::Numbered("1.5 kg"));
        assert_eq!(classify("Day 1."), LineKind::Paragraph("Day 1."));
    }

    #[test]
    fn test_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
    }

    #[test]
    fn test_render_plain() {
        let text = "# Matter\n\n## States\n- Solid\n1. Melting\nPlain text.";
        assert_eq!(
            render_plain(text),
            "MATTER\n\nStates\n  • Solid\n  1. Melting\nPlain text."
        );
    }

    #[test]
    fn test_render_terminal_keeps_line_count() {
        let text = "# A\n- b\n\n2. c\nd";
        let rendered = render_terminal(text);
        assert_eq!(rendered.split('\n').count(), 5);
        assert!(rendered.contains('d'));
        assert!(rendered.contains("2. c"));
    }
}
