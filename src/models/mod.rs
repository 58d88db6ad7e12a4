// src/models/mod.rs

pub mod answer;
pub mod course;
pub mod exam;
pub mod lesson;
pub mod level;
pub mod question;
pub mod user;
