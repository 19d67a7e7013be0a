//! Backend services: recording storage and upstream content.

pub mod content;
pub mod storage;
