pub mod actions;
pub mod app;
pub mod config;
pub mod indexer;
pub mod navigation;
pub mod path;
pub mod search;
pub mod session;
pub mod tree;
pub mod ui_model;
