//! Commands exposed to the display surface.

pub mod lists;
pub mod quiz;
pub mod settings;
pub mod transfer;
pub mod words;

pub use lists::{
    create_list, delete_all_lists, delete_list, get_list, list_lists, rename_list, search_lists,
    CommandError, DELETE_ALL_CONFIRMATION,
};
pub use quiz::{
    abandon_quiz, acknowledge_feedback, current_question, quiz_report, start_quiz, submit_answer,
};
pub use settings::{
    get_preferences, save_preferences, set_languages_swapped, set_prompt_synonyms, set_theme,
};
pub use transfer::{export_all, export_list, import_file, write_template};
pub use words::{add_word, delete_word, search_words, update_word, WordInput};
