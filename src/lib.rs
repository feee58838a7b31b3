pub mod config;
pub mod controller;
pub mod output;
pub mod parser;
pub mod selection;
pub mod source;
pub mod stats;
pub mod traffic;
