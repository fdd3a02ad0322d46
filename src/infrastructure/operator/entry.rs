//! Concrete operator handed to inbound adapters.

/// Stateless implementation of every operator port.
///
/// Each request carries its own configuration, so one instance serves the
/// whole process.
#[derive(Debug, Default, Clone, Copy)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
