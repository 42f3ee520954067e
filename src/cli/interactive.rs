//! Interactive loops
//!
//! Line-based prompts over any `BufRead`/`Write` pair so the flows can be
//! driven from tests. EOF at any prompt ends the flow quietly.

use crate::cli::Result;
use crate::selection::Selection;
use crate::study::{ChapterChat, StudyCopilot};
use copilot_core::OutputKind;
use std::io::{BufRead, Write};

/// Commands that end a chat
pub const QUIT_COMMANDS: [&str; 3] = ["/quit", "/q", "/exit"];

/// Render function applied to model output
pub type Renderer = fn(&str) -> String;

/// Line prompter
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Trimmed line, or `None` at EOF
    pub fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Numbered menu; returns a 0-based index
    ///
    /// With `skip_label`, entry 0 means "none" and yields `Some(None)`.
    /// Invalid answers re-prompt. `None` at EOF.
    pub fn choose(
        &mut self,
        title: &str,
        options: &[String],
        skip_label: Option<&str>,
    ) -> std::io::Result<Option<Option<usize>>> {
        self.say(title)?;
        if let Some(label) = skip_label {
            self.say(&format!("  0) {}", label))?;
        }
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {}", i + 1, option))?;
        }

        loop {
            let Some(answer) = self.ask("> ")? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(0) if skip_label.is_some() => return Ok(Some(None)),
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(Some(n - 1))),
                _ => self.say(&format!("Enter a number from the list ({} options)", options.len()))?,
            }
        }
    }
}

/// Chat until a quit command or EOF; returns the number of questions asked
pub fn run_chat<R: BufRead, W: Write>(
    chat: &mut ChapterChat<'_>,
    prompter: &mut Prompter<R, W>,
    render: Renderer,
) -> std::io::Result<usize> {
    prompter.say(&format!("Chapter AI Expert · {}", chat.scope()))?;
    prompter.say("Ask any doubt related to this chapter! (/quit to leave)")?;

    let mut asked = 0;
    while let Some(line) = prompter.ask("you> ")? {
        if line.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&line.as_str()) {
            break;
        }
        let reply = chat.ask(&line);
        asked += 1;
        prompter.say(&render(&reply))?;
    }
    Ok(asked)
}

/// Full study flow: pick, generate, show, then offer a chat
pub fn run_study<R: BufRead, W: Write>(
    copilot: &StudyCopilot,
    prompter: &mut Prompter<R, W>,
    render: Renderer,
) -> Result<()> {
    let mut selection = Selection::new(copilot.catalog());

    let grades: Vec<String> = copilot.catalog().grades().iter().map(|g| g.to_string()).collect();
    let Some(Some(i)) = prompter.choose("Class:", &grades, None)? else {
        return Ok(());
    };
    selection.set_grade(&grades[i])?;

    let subjects: Vec<String> = selection
        .available_subjects()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let Some(Some(i)) = prompter.choose("Subject:", &subjects, None)? else {
        return Ok(());
    };
    selection.set_subject(&subjects[i])?;

    // Menu follows book grouping; pick by chapter number
    let mut numbers = Vec::new();
    let mut labels = Vec::new();
    for (group, chapters) in selection.grouped_chapters() {
        for chapter in chapters {
            labels.push(format!("[{}] {}", group, chapter.title()));
            numbers.push(chapter.number.clone());
        }
    }
    if labels.is_empty() {
        prompter.say("No chapters are catalogued for this subject yet.")?;
        return Ok(());
    }
    let Some(Some(i)) = prompter.choose("Chapter:", &labels, None)? else {
        return Ok(());
    };
    selection.set_chapter_number(&numbers[i])?;

    let sub_topics = selection.available_sub_topics().to_vec();
    if !sub_topics.is_empty() {
        let Some(choice) = prompter.choose("Sub-topic:", &sub_topics, Some("Entire chapter"))?
        else {
            return Ok(());
        };
        selection.set_sub_topic(choice)?;
    }

    let kinds: Vec<String> = OutputKind::ALL.iter().map(|k| k.label().to_string()).collect();
    let Some(Some(i)) = prompter.choose("Output:", &kinds, None)? else {
        return Ok(());
    };
    selection.set_output_kind(OutputKind::ALL[i]);

    let Some(focus) = prompter.ask("Focus areas (optional): ")? else {
        return Ok(());
    };
    selection.set_focus(&focus);

    let Some(request) = selection.to_request() else {
        return Ok(());
    };
    prompter.say("Mapping NCERT context...")?;
    let content = copilot.generate(&request)?;
    prompter.say(&render(&content))?;

    let Some(answer) = prompter.ask("Ask a doubt about this chapter? [y/N] ")? else {
        return Ok(());
    };
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        let mut chat = copilot.open_chat(&request.grade_level, &request.subject, &request.chapter);
        run_chat(&mut chat, prompter, render)?;
    }
    Ok(())
}
