//! Application services (use cases).
//!
//! These services orchestrate domain logic and reach the outside world
//! only through ports.

pub mod aggregate;
pub mod corpus;
pub mod normalize;
pub mod pipeline;
pub mod scoring;
pub mod unify;
