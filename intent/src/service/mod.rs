pub mod email_intent;
