pub mod email_intent;
pub mod request;
