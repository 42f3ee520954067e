//! Command dispatch
//!
//! Resolves the data directory and config, builds the copilot, then runs
//! the chosen command. Errors are reported on stderr and mapped to exit
//! codes here.

use crate::cli::args::{AdminAction, ChapterArgs, Cli, Command};
use crate::cli::data_dir::{resolve_config_path, resolve_data_dir};
use crate::cli::interactive::{run_chat, run_study, Prompter, Renderer};
use crate::cli::{Result, EXIT_SUCCESS};
use crate::config::Config;
use crate::render::{render_plain, render_terminal};
use crate::selection::Selection;
use crate::study::StudyCopilot;
use copilot_core::{group_chapters, Catalog, NewUpload, OutputKind, UploadRecord};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run a parsed command line and return the exit code
pub fn run(cli: Cli) -> ExitCode {
    match run_command(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    // The catalog never touches the data directory
    if let Command::Catalog { grade, subject } = &cli.command {
        let stdout = std::io::stdout();
        return print_catalog(&mut stdout.lock(), grade.as_deref(), subject.as_deref());
    }

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config_path = resolve_config_path(cli.config.as_deref(), &data_dir);
    let config = Config::load(&config_path)?;
    let copilot = StudyCopilot::from_config(&config, &data_dir)?;
    info!(
        data_dir = %data_dir.display(),
        provider = copilot.gateway().provider_name(),
        "ready"
    );

    match cli.command {
        Command::Catalog { .. } => Ok(()),
        Command::Generate {
            chapter,
            subtopic,
            kind,
            focus,
            output,
            plain,
        } => run_generate(
            &copilot,
            &chapter,
            subtopic.as_deref(),
            kind.unwrap_or_default(),
            focus.as_deref(),
            output.as_deref(),
            renderer(plain),
        ),
        Command::Chat { chapter, plain } => {
            let selection = select_chapter(copilot.catalog(), &chapter)?;
            let Some(chosen) = selection.chapter() else {
                return Ok(());
            };
            let mut chat = copilot.open_chat(&chapter.grade, &chapter.subject, chosen);
            let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());
            run_chat(&mut chat, &mut prompter, renderer(plain))?;
            Ok(())
        }
        Command::Study { plain } => {
            let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());
            run_study(&copilot, &mut prompter, renderer(plain))
        }
        Command::Admin { passphrase, action } => {
            let stdout = std::io::stdout();
            run_admin(&copilot, &passphrase, action, &mut stdout.lock())
        }
    }
}

fn renderer(plain: bool) -> Renderer {
    if plain {
        render_plain
    } else {
        render_terminal
    }
}

fn select_chapter<'c>(catalog: &'c Catalog, args: &ChapterArgs) -> Result<Selection<'c>> {
    let mut selection = Selection::new(catalog);
    selection.set_grade(&args.grade)?;
    selection.set_subject(&args.subject)?;
    selection.set_chapter_number(&args.chapter)?;
    Ok(selection)
}

fn run_generate(
    copilot: &StudyCopilot,
    chapter: &ChapterArgs,
    subtopic: Option<&str>,
    kind: OutputKind,
    focus: Option<&str>,
    output: Option<&Path>,
    render: Renderer,
) -> Result<()> {
    let mut selection = select_chapter(copilot.catalog(), chapter)?;
    if let Some(subtopic) = subtopic {
        selection.set_sub_topic_named(subtopic)?;
    }
    selection.set_output_kind(kind);
    if let Some(focus) = focus {
        selection.set_focus(focus);
    }

    let Some(request) = selection.to_request() else {
        return Ok(());
    };
    let content = copilot.generate(&request)?;
    println!("{}", render(&content));

    if let Some(path) = output {
        std::fs::write(path, render_plain(&content))?;
        info!(path = %path.display(), "result written");
    }
    Ok(())
}

/// Print grades, subjects and chapters
pub fn print_catalog<W: Write>(out: &mut W, grade: Option<&str>, subject: Option<&str>) -> Result<()> {
    let catalog = Catalog::builtin();
    let mut selection = Selection::new(catalog);

    let Some(grade) = grade else {
        for grade in catalog.grades() {
            writeln!(out, "{}", grade)?;
            for subject in catalog.subjects_for(grade) {
                let count = catalog.chapters(grade, subject).len();
                writeln!(out, "  {} ({} chapters)", subject, count)?;
            }
        }
        return Ok(());
    };
    selection.set_grade(grade)?;

    let subjects: Vec<&str> = match subject {
        Some(subject) => {
            selection.set_subject(subject)?;
            vec![subject]
        }
        None => selection.available_subjects().to_vec(),
    };

    for subject in subjects {
        writeln!(out, "{} · {}", grade, subject)?;
        let chapters = catalog.chapters(grade, subject);
        if chapters.is_empty() {
            writeln!(out, "  (no chapters catalogued)")?;
            continue;
        }
        for (group, members) in group_chapters(subject, chapters) {
            writeln!(out, "  {}", group)?;
            for chapter in members {
                writeln!(out, "    {}", chapter.title())?;
            }
        }
    }
    Ok(())
}

fn run_admin<W: Write>(
    copilot: &StudyCopilot,
    passphrase: &str,
    action: AdminAction,
    out: &mut W,
) -> Result<()> {
    let token = copilot.unlock_admin(passphrase)?;

    match action {
        AdminAction::Ingest {
            grade,
            subject,
            chapter,
            content_type,
            text,
            file,
        } => {
            let mut selection = Selection::new(copilot.catalog());
            selection.set_grade(&grade)?;
            selection.set_subject(&subject)?;

            let (content, file_name) = read_content(text, file.as_deref())?;
            let mut upload = NewUpload::manual(grade, subject, chapter, content_type, content);
            if let Some(name) = file_name {
                upload.file_name = name;
            }
            let record = copilot.uploads().save(&token, upload);
            writeln!(out, "Saved {} ({})", record.id, record.file_name)?;
        }
        AdminAction::List => {
            let records = copilot.uploads().list();
            if records.is_empty() {
                writeln!(out, "No uploads.")?;
            }
            for record in &records {
                writeln!(out, "{}", describe(record))?;
            }
        }
        AdminAction::Clear => {
            copilot.uploads().clear(&token);
            writeln!(out, "All uploads removed.")?;
        }
    }
    Ok(())
}

fn read_content(text: Option<String>, file: Option<&Path>) -> Result<(String, Option<String>)> {
    match (text, file) {
        (Some(text), _) => Ok((text, None)),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            Ok((content, name))
        }
        (None, None) => Err(crate::cli::Error::InvalidArgs(
            "ingest needs --text or --file".to_string(),
        )),
    }
}

fn describe(record: &UploadRecord) -> String {
    let when = chrono::DateTime::from_timestamp_millis(record.created_at_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| record.created_at_millis.to_string());
    format!(
        "{}  {} | {} | {} | {} | {} | {}",
        record.id,
        record.grade_level,
        record.subject,
        record.chapter_label,
        record.content_type,
        record.file_name,
        when
    )
}
