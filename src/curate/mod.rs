// Human curation loop — name and keep/discard each discovered topic.
//
// The loop is an explicit state machine rather than ad-hoc string checks:
// each topic is presented, then named, then classified, and a literal "Q"
// at the name prompt aborts the whole session, returning whatever was
// collected so far. Input goes through the Prompter trait so tests can
// script a session without a terminal.

use anyhow::{Context, Result};
use std::io::Write;

use crate::output::terminal;
use crate::topics::labels::TopicSummary;

/// One answered topic: the human-assigned name and the keep decision.
pub type TopicVerdict = (String, bool);

/// Source of interactive answers. The production implementor blocks on
/// stdin; tests supply a scripted sequence.
pub trait Prompter {
    fn prompt(&mut self, question: &str) -> Result<String>;
}

/// Blocking stdin prompter for terminal sessions.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, question: &str) -> Result<String> {
        print!("{question}");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

enum CurationState {
    Presenting(usize),
    AwaitingName(usize),
    AwaitingKeep(usize),
    Done,
    Aborted,
}

/// Walk the topics in order, prompting for a name and a keep decision.
///
/// Returns one slot per input topic, index-aligned. Slots for topics not
/// reached before a "Q" abort stay `None` — including the slot of the
/// topic being named when "Q" was entered.
pub fn curate_topics(
    topics: &[TopicSummary],
    prompter: &mut dyn Prompter,
) -> Result<Vec<Option<TopicVerdict>>> {
    let mut verdicts: Vec<Option<TopicVerdict>> = vec![None; topics.len()];
    let mut pending_name = String::new();

    let mut state = if topics.is_empty() {
        CurationState::Done
    } else {
        CurationState::Presenting(0)
    };

    loop {
        state = match state {
            CurationState::Presenting(i) => {
                terminal::print_topic(i, &topics[i]);
                CurationState::AwaitingName(i)
            }
            CurationState::AwaitingName(i) => {
                let name = prompter.prompt("Name this topic: ")?;
                if name.trim() == "Q" {
                    CurationState::Aborted
                } else {
                    pending_name = name;
                    CurationState::AwaitingKeep(i)
                }
            }
            CurationState::AwaitingKeep(i) => {
                let answer = prompter.prompt("Keep? (0 or 1): ")?;
                verdicts[i] = Some((std::mem::take(&mut pending_name), parse_keep(&answer)));
                if i + 1 < topics.len() {
                    CurationState::Presenting(i + 1)
                } else {
                    CurationState::Done
                }
            }
            CurationState::Done | CurationState::Aborted => break,
        };
    }

    Ok(verdicts)
}

fn parse_keep(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "1" | "y" | "yes")
}
