use derive_more::{Display, Error};

#[derive(Debug, Display, Error, PartialEq)]
pub enum PromptSetError {
    #[display(fmt = "A prompt set needs at least one prompt")]
    Empty,
    #[display(fmt = "Prompt id {} is used more than once", id)]
    DuplicateId { id: String },
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum ResponseError {
    #[display(fmt = "There is no prompt with id {}", id)]
    UnknownPrompt { id: String },
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum FormError {
    #[display(fmt = "Please add a few words to every question so your letter feels complete.")]
    Incomplete { missing: Vec<String> },
    #[display(fmt = "Could not save the letter: {}", reason)]
    Save { reason: String },
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum IntentError {
    #[display(fmt = "Add your email or at least one recipient so we know who to follow up with.")]
    NothingToFollowUp,
    #[display(fmt = "We already have your request, we'll follow up before sending anything.")]
    AlreadySubmitted,
}
