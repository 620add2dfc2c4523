mod catalog_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use catalog_vm::{QuizCardVm, map_quiz_cards};
pub use quiz_vm::{OptionState, OptionVm, QuizVm, difficulty_label};
pub use result_vm::ResultVm;
pub use time_fmt::format_countdown;
