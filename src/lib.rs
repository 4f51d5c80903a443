pub mod cli;
pub mod config;
pub mod draw;
pub mod extract;
pub mod logging;
pub mod models;
pub mod position;
pub mod scroll;
pub mod selection;
pub mod settings;
pub mod source;
pub mod surface;
pub mod window;
