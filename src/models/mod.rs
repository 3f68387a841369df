// src/models/mod.rs

pub mod cell;
pub mod index;
pub mod quiz;
pub mod upload;
