//! CLI module graph.

pub mod collect;
pub mod command;
pub mod config;
pub mod corpus;
pub mod diagnostic;
pub mod dispatch;
pub mod operator;
pub mod output;
pub mod paths;
pub mod report;
pub mod run;
pub mod score;
pub mod stage;
pub mod unify;
