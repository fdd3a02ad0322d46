//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  normalize, score, unify │
//!     ┌───────────┤  aggregate, corpus       ├───────────┐
//!     │           └──────────────────────────┘           │
//!     ▼                        ▼                         ▼
//! ┌─────────┐          ┌───────────────┐           ┌──────────┐
//! │ Source  │          │    Scorer     │           │   Llm    │
//! │ Adapter │          │ (lexical/LLM) │           │ Adapter  │
//! └─────────┘          └───────────────┘           └──────────┘
//! ```

pub mod inbound;
pub mod outbound;
