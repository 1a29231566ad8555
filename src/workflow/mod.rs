//! Wizard workflow: the session state machine and the generation
//! orchestrator. Everything here is gateway-agnostic; I/O happens only
//! through the injected [`CapabilityGateway`](crate::gateway::CapabilityGateway).

mod orchestrator;
mod session;

pub use orchestrator::Orchestrator;
pub use session::{FALLBACK_THEMES, Session};
