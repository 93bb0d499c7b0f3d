mod call_command;
mod call_state;
mod orchestrator;

pub use call_command::CallCommand;
pub use call_state::CallSnapshot;
pub use orchestrator::{CallConfig, CallHandle, CallOrchestrator};
