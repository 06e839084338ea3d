//! Command-line surface over the command layer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use quiz_core::types::{count_options, ListSummary, RequestedCount, Theme, WordList, WordRecord};
use quiz_core::{ListFilter, QuestionView, QuizEvent, SessionReport};

use crate::commands::{self, WordInput};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "woordtrainer", version, about = "Vocabulary trainer with review of missed words")]
pub struct Cli {
    /// Database file (defaults to $WOORDTRAINER_DB, then the user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show all word lists
    Lists,

    /// Create an empty word list
    CreateList {
        name: String,
        /// Language of the words being learned
        #[arg(long)]
        source: String,
        /// Language of the translations
        #[arg(long)]
        target: String,
    },

    /// Rename a list
    RenameList { list: String, name: String },

    /// Delete a list and its words
    DeleteList { list: String },

    /// Delete every list
    DeleteAll {
        /// Must be CONFIRM
        #[arg(long)]
        confirm: String,
    },

    /// Show the words of a list
    ShowList { list: String },

    /// Add a word, fields in display order
    AddWord {
        list: String,
        first: String,
        second: String,
        /// Comma-separated synonyms of the first field
        #[arg(long, default_value = "")]
        first_synonyms: String,
        /// Comma-separated synonyms of the second field
        #[arg(long, default_value = "")]
        second_synonyms: String,
    },

    /// Replace the word at a position (1-based)
    EditWord {
        list: String,
        position: usize,
        first: String,
        second: String,
        #[arg(long, default_value = "")]
        first_synonyms: String,
        #[arg(long, default_value = "")]
        second_synonyms: String,
    },

    /// Delete the word at a position (1-based)
    DeleteWord { list: String, position: usize },

    /// Search lists by name, or by language with --language
    SearchLists {
        term: String,
        #[arg(long)]
        language: bool,
    },

    /// Search the words of a list
    SearchWords { list: String, term: String },

    /// Practice a list
    Quiz {
        list: String,
        /// Number of words to ask, or "all"
        #[arg(long, default_value = "all")]
        count: RequestedCount,
        /// Vary prompts using their synonyms
        #[arg(long)]
        prompt_synonyms: bool,
    },

    /// Export all lists, or one with --list
    Export {
        #[arg(long)]
        list: Option<String>,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Import lists from an export file
    Import { file: PathBuf },

    /// Print the import format, or write it into --out
    Template {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show or change preferences
    Settings {
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
        /// Ask the translation and expect the original word
        #[arg(long)]
        swap: Option<bool>,
        #[arg(long)]
        prompt_synonyms: Option<bool>,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(&s.to_lowercase()).ok_or_else(|| format!("unknown theme '{s}' (light or dark)"))
}

/// Find a list by id or by name, ignoring case.
fn resolve_list(key: &str, state: &AppState) -> anyhow::Result<ListSummary> {
    let lists = commands::list_lists(state)?;
    lists
        .into_iter()
        .find(|l| l.id == key || l.name.to_lowercase() == key.trim().to_lowercase())
        .ok_or_else(|| anyhow!("no list named '{key}'"))
}

fn word_input(
    first: String,
    second: String,
    first_synonyms: String,
    second_synonyms: String,
) -> WordInput {
    WordInput {
        shown_first: first,
        shown_second: second,
        first_synonyms,
        second_synonyms,
    }
}

fn position_index(position: usize) -> anyhow::Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}

pub fn execute(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Lists => print_lists(&commands::list_lists(state)?),
        Command::CreateList { name, source, target } => {
            let list = commands::create_list(&name, &source, &target, state)?;
            println!(
                "Created '{}' ({} -> {})",
                list.name, list.source_language, list.target_language
            );
        }
        Command::RenameList { list, name } => {
            let id = resolve_list(&list, state)?.id;
            let renamed = commands::rename_list(&id, &name, state)?;
            println!("Renamed to '{}'", renamed.name);
        }
        Command::DeleteList { list } => {
            let summary = resolve_list(&list, state)?;
            let words = commands::delete_list(&summary.id, state)?;
            println!("Deleted '{}' and {words} words", summary.name);
        }
        Command::DeleteAll { confirm } => {
            let (lists, words) = commands::delete_all_lists(&confirm, state)?;
            println!("Deleted {lists} lists and {words} words");
        }
        Command::ShowList { list } => {
            let id = resolve_list(&list, state)?.id;
            let list = commands::get_list(&id, state)?;
            let swapped = commands::get_preferences(state)?.languages_swapped;
            let rows: Vec<(usize, &WordRecord)> = list.words.iter().enumerate().collect();
            print_words(&list, &rows, swapped);
            let sizes: Vec<String> = count_options(list.words.len())
                .iter()
                .map(|c| c.to_string())
                .collect();
            if !sizes.is_empty() {
                println!("Quiz sizes: {}", sizes.join(", "));
            }
        }
        Command::AddWord { list, first, second, first_synonyms, second_synonyms } => {
            let id = resolve_list(&list, state)?.id;
            let input = word_input(first, second, first_synonyms, second_synonyms);
            let word = commands::add_word(&id, &input, state)?;
            println!("Added {} = {}", word.source, word.target);
        }
        Command::EditWord { list, position, first, second, first_synonyms, second_synonyms } => {
            let id = resolve_list(&list, state)?.id;
            let input = word_input(first, second, first_synonyms, second_synonyms);
            let word = commands::update_word(&id, position_index(position)?, &input, state)?;
            println!("Updated #{position}: {} = {}", word.source, word.target);
        }
        Command::DeleteWord { list, position } => {
            let id = resolve_list(&list, state)?.id;
            commands::delete_word(&id, position_index(position)?, state)?;
            println!("Deleted #{position}");
        }
        Command::SearchLists { term, language } => {
            let filter = if language { ListFilter::Language } else { ListFilter::Name };
            print_lists(&commands::search_lists(&term, filter, state)?);
        }
        Command::SearchWords { list, term } => {
            let id = resolve_list(&list, state)?.id;
            let list = commands::get_list(&id, state)?;
            let swapped = commands::get_preferences(state)?.languages_swapped;
            let hits = commands::search_words(&id, &term, state)?;
            let rows: Vec<(usize, &WordRecord)> = hits.iter().map(|(i, w)| (*i, w)).collect();
            print_words(&list, &rows, swapped);
        }
        Command::Quiz { list, count, prompt_synonyms } => {
            let id = resolve_list(&list, state)?.id;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let override_synonyms = prompt_synonyms.then_some(true);
            run_quiz(&id, count, override_synonyms, state, &mut stdin.lock(), &mut stdout.lock())?;
        }
        Command::Export { list, out } => {
            let path = match list {
                Some(list) => {
                    let id = resolve_list(&list, state)?.id;
                    commands::export_list(&id, &out, state)?
                }
                None => commands::export_all(&out, state)?,
            };
            println!("Exported to {}", path.display());
        }
        Command::Import { file } => {
            let summary = commands::import_file(&file, state)?;
            println!("Imported {} lists with {} words", summary.lists, summary.words);
        }
        Command::Template { out } => match out {
            Some(dir) => {
                let path = commands::write_template(&dir)?;
                println!("Template written to {}", path.display());
            }
            None => println!("{}", quiz_core::transfer::template_document().to_json_pretty()?),
        },
        Command::Settings { theme, swap, prompt_synonyms } => {
            if let Some(theme) = theme {
                commands::set_theme(theme, state)?;
            }
            if let Some(swapped) = swap {
                commands::set_languages_swapped(swapped, state)?;
            }
            if let Some(enabled) = prompt_synonyms {
                commands::set_prompt_synonyms(enabled, state)?;
            }
            let prefs = commands::get_preferences(state)?;
            println!("theme: {}", prefs.theme.as_str());
            println!("languages swapped: {}", prefs.languages_swapped);
            println!("prompt synonyms: {}", prefs.use_prompt_synonyms);
        }
    }
    Ok(())
}

fn print_lists(lists: &[ListSummary]) {
    if lists.is_empty() {
        println!("No word lists.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Languages", "Words", "Created"]);
    for list in lists {
        table.add_row(vec![
            Cell::new(&list.name),
            Cell::new(format!("{} -> {}", list.source_language, list.target_language)),
            Cell::new(list.word_count),
            Cell::new(list.created_at.format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
}

fn print_words(list: &WordList, rows: &[(usize, &WordRecord)], swapped: bool) {
    let (first, second) = list.display_languages(swapped);
    println!("{} ({} words)", list.name, list.words.len());
    if rows.is_empty() {
        println!("No words.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#".to_string(), first.to_string(), second.to_string()]);
    for (index, word) in rows {
        let (shown_first, first_syn, shown_second, second_syn) = if swapped {
            (&word.target, &word.target_synonyms, &word.source, &word.source_synonyms)
        } else {
            (&word.source, &word.source_synonyms, &word.target, &word.target_synonyms)
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(with_synonyms(shown_first, first_syn)),
            Cell::new(with_synonyms(shown_second, second_syn)),
        ]);
    }
    println!("{table}");
}

fn with_synonyms(text: &str, synonyms: &[String]) -> String {
    if synonyms.is_empty() {
        text.to_string()
    } else {
        format!("{text} ({})", synonyms.join(", "))
    }
}

const BAR_WIDTH: usize = 20;

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Read one line. `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask<I: BufRead, O: Write>(
    view: &QuestionView,
    input: &mut I,
    out: &mut O,
) -> io::Result<Option<String>> {
    writeln!(out)?;
    writeln!(out, "{} {}", progress_bar(view.progress.percent()), view.progress)?;
    writeln!(out, "{}", view.prompt)?;
    loop {
        write!(out, "{}: ", view.answer_field_label)?;
        out.flush()?;
        match read_line(input)? {
            Some(answer) if answer.trim().is_empty() => writeln!(out, "Type an answer first.")?,
            other => return Ok(other),
        }
    }
}

/// Run a quiz interactively. Returns `None` when input ends early; the
/// quiz is then abandoned.
pub fn run_quiz<I: BufRead, O: Write>(
    list_id: &str,
    requested: RequestedCount,
    use_prompt_synonyms: Option<bool>,
    state: &AppState,
    input: &mut I,
    out: &mut O,
) -> anyhow::Result<Option<SessionReport>> {
    let mut view = commands::start_quiz(list_id, requested, use_prompt_synonyms, state)?;

    let report = loop {
        let Some(answer) = ask(&view, input, out)? else {
            commands::abandon_quiz(state)?;
            writeln!(out, "\nQuiz stopped.")?;
            return Ok(None);
        };

        let event = match commands::submit_answer(&answer, state)? {
            QuizEvent::Feedback(feedback) => {
                let accepted = feedback.accepted_answers.join(" / ");
                writeln!(out, "Not quite. {} = {accepted}", feedback.prompt)?;
                write!(out, "Press Enter to continue")?;
                out.flush()?;
                read_line(input)?;
                commands::acknowledge_feedback(state)?
            }
            event => {
                writeln!(out, "Correct!")?;
                event
            }
        };

        match event {
            QuizEvent::Question(next) => view = next,
            QuizEvent::Complete(report) => break report,
            QuizEvent::Feedback(_) => bail!("quiz reported feedback twice"),
        }
    };

    print_report(&report, out)?;
    Ok(Some(report))
}

fn print_report<O: Write>(report: &SessionReport, out: &mut O) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}% ({} of {} words), {} attempts, {} repeated",
        report.accuracy,
        report.correct_count,
        report.total_count,
        report.total_attempts,
        report.repeated_attempts
    )?;

    let mut table = Table::new();
    table.set_header(vec!["Word", "Accepted", "Your answers", "Result"]);
    for outcome in &report.per_word {
        let answers: Vec<&str> = outcome.attempts.iter().map(|a| a.submitted.as_str()).collect();
        table.add_row(vec![
            Cell::new(&outcome.word.prompt),
            Cell::new(outcome.accepted_answers.join(", ")),
            Cell::new(answers.join(" -> ")),
            Cell::new(if outcome.is_correct { "correct" } else { "missed" }),
        ]);
    }
    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn single_word_state() -> (AppState, String) {
        let state = AppState::new(SqliteRepository::open_in_memory().unwrap());
        let list = commands::create_list("Basis", "Nederlands", "Engels", &state).unwrap();
        let input = word_input("fiets".into(), "bike".into(), String::new(), "bicycle".into());
        commands::add_word(&list.id, &input, &state).unwrap();
        (state, list.id)
    }

    fn quiz(state: &AppState, list_id: &str, input: &str) -> (Option<SessionReport>, String) {
        let mut out = Vec::new();
        let report = run_quiz(
            list_id,
            RequestedCount::All,
            None,
            state,
            &mut Cursor::new(input.as_bytes().to_vec()),
            &mut out,
        )
        .unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn blank_answers_are_asked_again() {
        let (state, list_id) = single_word_state();
        let (report, output) = quiz(&state, &list_id, "\n  \nBicycle\n");
        let report = report.unwrap();

        assert_eq!(report.total_attempts, 1);
        assert_eq!(report.accuracy, 100);
        assert_eq!(output.matches("Type an answer first.").count(), 2);
        assert!(output.contains("[####################] 1 / 1\nfiets"));
    }

    #[test]
    fn missed_word_comes_back_for_review() {
        let (state, list_id) = single_word_state();
        let (report, output) = quiz(&state, &list_id, "fietsen\n\nbike\n");
        let report = report.unwrap();

        assert!(output.contains("Not quite. fiets = bike / bicycle"));
        assert!(output.contains("Review: 1 / 1"));
        assert_eq!(report.total_attempts, 2);
        assert_eq!(report.repeated_attempts, 1);
        assert_eq!(report.accuracy, 100);
    }

    #[test]
    fn end_of_input_abandons() {
        let (state, list_id) = single_word_state();
        let (report, output) = quiz(&state, &list_id, "");
        assert_eq!(report, None);
        assert!(output.contains("Quiz stopped."));
        assert!(commands::current_question(&state).unwrap().is_none());
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn lists_resolve_by_name_ignoring_unicode_case() {
        let state = AppState::new(SqliteRepository::open_in_memory().unwrap());
        let list = commands::create_list("Ärger", "Duits", "Nederlands", &state).unwrap();

        assert_eq!(resolve_list("ÄRGER", &state).unwrap().id, list.id);
        assert_eq!(resolve_list(&list.id, &state).unwrap().name, "Ärger");
        assert!(resolve_list("Aerger", &state).is_err());
    }

    #[test]
    fn theme_parsing() {
        assert_eq!(parse_theme("Dark").unwrap(), Theme::Dark);
        assert!(parse_theme("blue").is_err());
    }

    #[test]
    fn cli_parses_quiz_count() {
        let cli = Cli::try_parse_from(["woordtrainer", "quiz", "Basis", "--count", "5"]).unwrap();
        match cli.command {
            Command::Quiz { count, prompt_synonyms, .. } => {
                assert_eq!(count, RequestedCount::Count(5));
                assert!(!prompt_synonyms);
            }
            _ => panic!("expected quiz command"),
        }
        assert!(Cli::try_parse_from(["woordtrainer", "quiz", "Basis", "--count", "lots"]).is_err());
    }
}
