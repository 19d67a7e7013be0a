//! HTTP route handlers

pub mod adhkar;
pub mod bookmarks;
pub mod check;
pub mod hadith;
pub mod prayer;
pub mod quran;
pub mod recitations;
