pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod event;
pub mod geometry;
pub mod menu;
pub mod ui;
pub mod utils;
