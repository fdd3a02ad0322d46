//! Unified operator capability surface for inbound adapters.

use super::config::ConfigurationOperator;
use super::pipeline::PipelineOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: ConfigurationOperator + PipelineOperator {}

impl<T> OperatorPort for T where T: ConfigurationOperator + PipelineOperator {}
