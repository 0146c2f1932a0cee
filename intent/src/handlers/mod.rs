pub mod email_intent;
pub mod indexer;
