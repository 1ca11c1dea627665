pub mod ai;
pub mod auth;
pub mod config;
pub mod mailer;
pub mod resolver;
pub mod seed;
pub mod state;
pub mod web;
