pub mod chat_log;
pub mod landmark;
pub mod route;
pub mod search_log;
pub mod suggestion;
pub mod user;
