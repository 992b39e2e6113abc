pub mod app;
pub mod comfy_table;
pub mod commands;
pub mod dir_size;
pub mod download;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod settings;
pub mod units;
