// src/services/mod.rs

pub mod converter;
pub mod github;
pub mod publisher;
pub mod remote_store;
pub mod spreadsheet;
pub mod text_parser;
