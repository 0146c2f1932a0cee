pub mod beacon;
pub mod config;
pub mod details;
pub mod download;
pub mod error;
pub mod form;
pub mod format;
pub mod intent;
pub mod navigator;
pub mod prompts;
pub mod responses;
pub mod terminal;

pub use form::LetterForm;
pub use prompts::{Prompt, PromptSet};
pub use responses::ResponseMap;
