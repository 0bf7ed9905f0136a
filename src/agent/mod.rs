//! Agent module - turns trip requests into model answers.
//!
//! Two dispatch modes are available:
//! - **direct**: the route prompt is sent to a fresh chat and the reply text
//!   returned as is;
//! - **tool loop**: the model may call weather, traffic and directions
//!   lookups, whose results are fed back until it answers or the step
//!   budget runs out.

mod agent_loop;
mod dispatcher;
mod prompt;

pub use agent_loop::{Agent, AgentRun};
pub use dispatcher::Dispatcher;
pub use prompt::{build_route_prompt, build_system_prompt};
