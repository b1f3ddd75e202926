pub mod config;
pub mod engine;
pub mod error;
pub mod llm_client;
pub mod narrative_parser;
pub mod prompt_builder;
pub mod protocol;
