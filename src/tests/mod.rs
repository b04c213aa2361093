mod reader;
mod config;
