pub mod config;
pub mod controllers;
pub mod error;
pub mod list;
pub mod models;
pub mod storage;
pub mod tui;
