//! Conversational session flow: an explicit state machine over textual
//! prompts and responses. The hosting front-end owns transport and
//! rendering; this module owns states, transitions, and reply text.

use tracing::debug;

use crate::arcana::PersonalConstant;
use crate::forecast::{DailyValue, month_ahead, over_range, today_value};
use crate::range::{DateRange, RangeError};

const CANCEL_COMMAND: &str = "/cancel";

const CHOOSE_PROMPT: &str =
    "Choose an action: \"today\", \"month ahead\", or \"date range\".";
const BIRTHDATE_PROMPT: &str = "Enter your birthdate in the DD.MM.YYYY format:";
const RANGE_PROMPT: &str = "Enter a date range in the DD.MM.YYYY-DD.MM.YYYY format:";
const RANGE_REPROMPT: &str = "Please enter the dates in the DD.MM.YYYY-DD.MM.YYYY format.";
const INVERTED_REPROMPT: &str = "The start date cannot be after the end date. Try again.";
const AGAIN_PROMPT: &str =
    "Calculate again? Choose an action: \"today\", \"month ahead\", or \"date range\".";
const CANCELLED: &str = "Cancelled. Start a new session whenever you want another calculation.";
const ENDED_HINT: &str = "This session has ended. Start a new session to calculate again.";

/// One of the three calculation actions offered at the start of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Today's value only
    Today,
    /// Today through 29 days ahead
    MonthAhead,
    /// A caller-supplied inclusive date range
    Range,
}

impl Choice {
    /// Keyword-matches a textual command, case-insensitively.
    /// Range keywords are checked first so "date range" never reads as
    /// a date request.
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.to_lowercase();
        let lower = lower.trim();
        if lower.contains("range") || lower.contains("period") {
            Some(Self::Range)
        } else if lower.contains("month") {
            Some(Self::MonthAhead)
        } else if lower.contains("today") || lower.contains("day") {
            Some(Self::Today)
        } else {
            None
        }
    }
}

/// Session state, tagged with the data each state needs to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Awaiting one of the three action commands
    Choosing,
    /// Awaiting birthdate text for the chosen action
    AwaitingBirthdate { choice: Choice },
    /// Awaiting range text; the constant survives re-prompts
    AwaitingRange { constant: PersonalConstant },
    /// Terminal: the user cancelled
    Ended,
}

/// A single conversation. Plain data, one per user; independent
/// sessions never share state.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Starts a new session at the action menu.
    pub const fn new() -> Self {
        Self {
            state: SessionState::Choosing,
        }
    }

    /// The opening prompt a front-end should show for a fresh session.
    pub const fn greeting() -> &'static str {
        CHOOSE_PROMPT
    }

    /// Returns the current state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The transition function: consumes one inbound message, moves the
    /// state machine, and returns the reply text to send back.
    pub fn handle_message(&mut self, input: &str) -> String {
        if input.trim() == CANCEL_COMMAND {
            debug!(state = ?self.state, "session cancelled");
            self.state = SessionState::Ended;
            return CANCELLED.to_owned();
        }

        match self.state {
            SessionState::Choosing => self.choose(input),
            SessionState::AwaitingBirthdate { choice } => self.receive_birthdate(choice, input),
            SessionState::AwaitingRange { constant } => self.receive_range(constant, input),
            SessionState::Ended => ENDED_HINT.to_owned(),
        }
    }

    fn choose(&mut self, input: &str) -> String {
        match Choice::parse(input) {
            Some(choice) => {
                debug!(?choice, "action chosen");
                self.state = SessionState::AwaitingBirthdate { choice };
                BIRTHDATE_PROMPT.to_owned()
            }
            None => CHOOSE_PROMPT.to_owned(),
        }
    }

    fn receive_birthdate(&mut self, choice: Choice, input: &str) -> String {
        // Digit extraction cannot fail, so this state never re-prompts
        let constant = PersonalConstant::from_text(input);
        debug!(constant = constant.get(), ?choice, "personal constant derived");

        match choice {
            Choice::Today => {
                self.state = SessionState::Choosing;
                format!("{}\n\n{AGAIN_PROMPT}", today_value(constant))
            }
            Choice::MonthAhead => {
                self.state = SessionState::Choosing;
                format!("{}\n\n{AGAIN_PROMPT}", render_lines(&month_ahead(constant)))
            }
            Choice::Range => {
                self.state = SessionState::AwaitingRange { constant };
                RANGE_PROMPT.to_owned()
            }
        }
    }

    fn receive_range(&mut self, constant: PersonalConstant, input: &str) -> String {
        match input.parse::<DateRange>() {
            Ok(range) => {
                debug!(range = %range, "range accepted");
                self.state = SessionState::Choosing;
                format!(
                    "{}\n\n{AGAIN_PROMPT}",
                    render_lines(&over_range(&range, constant))
                )
            }
            // Semantic failure, distinct from a parse failure; the
            // constant stays in the state for the retry
            Err(RangeError::Inverted { .. }) => INVERTED_REPROMPT.to_owned(),
            Err(_) => RANGE_REPROMPT.to_owned(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn render_lines(values: &[DailyValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
