use quiz_core::model::Difficulty;
use services::QuizSessionView;

use super::time_fmt::format_countdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Neutral,
    Correct,
    Wrong,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Neutral => "option",
            OptionState::Correct => "option option-correct",
            OptionState::Wrong => "option option-wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub state: OptionState,
}

/// Display model for the active question of an attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub heading: String,
    pub topic: String,
    pub position_label: String,
    pub prompt: String,
    pub difficulty_label: &'static str,
    pub options: Vec<OptionVm>,
    pub locked: bool,
    /// "Correct answer: ..." after a wrong pick.
    pub reveal: Option<String>,
    pub timer_label: String,
    pub time_up: bool,
    pub progress_percent: f64,
    pub can_previous: bool,
    pub can_next: bool,
}

impl QuizVm {
    #[must_use]
    pub fn from_view(view: &QuizSessionView) -> Self {
        let options = view
            .options
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                letter: option_letter(index),
                text: text.clone(),
                state: option_state(view, index),
            })
            .collect();

        let reveal = match (view.is_correct, view.correct_option) {
            (Some(false), Some(correct)) => view
                .options
                .get(correct)
                .map(|text| format!("Correct answer: {text}")),
            _ => None,
        };

        Self {
            heading: view.heading.clone(),
            topic: view.topic.clone(),
            position_label: format!("Question {} of {}", view.current_index + 1, view.total),
            prompt: view.question.clone(),
            difficulty_label: difficulty_label(view.difficulty),
            options,
            locked: view.selected_option.is_some(),
            reveal,
            timer_label: format_countdown(view.time_remaining_secs),
            time_up: view.time_remaining_secs == 0,
            progress_percent: view.progress_percent,
            can_previous: view.has_previous,
            can_next: view.has_next,
        }
    }

    /// Inline style for the progress bar.
    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {:.0}%;", self.progress_percent)
    }
}

#[must_use]
pub fn difficulty_label(difficulty: Option<Difficulty>) -> &'static str {
    difficulty.map_or("Unknown", Difficulty::label)
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

fn option_state(view: &QuizSessionView, index: usize) -> OptionState {
    if view.selected_option != Some(index) {
        return OptionState::Neutral;
    }
    match view.is_correct {
        Some(true) => OptionState::Correct,
        Some(false) => OptionState::Wrong,
        None => OptionState::Neutral,
    }
}
