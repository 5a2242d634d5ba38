pub mod auth;
pub mod flashcards;
pub mod reviews;
pub mod users;
