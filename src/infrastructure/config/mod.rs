//! Infrastructure configuration modules.

pub mod llm;
pub mod logging;
pub mod matching;
pub mod settings;
pub mod source;
