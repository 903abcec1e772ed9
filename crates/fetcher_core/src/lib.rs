//! Fetcher core: pure state machine for the sequential block-hash fetch loop.
mod effect;
mod format;
mod msg;
mod state;
mod update;

pub use effect::Effect;
pub use format::{render_lines, LineFormat};
pub use msg::Msg;
pub use state::{
    FlushPolicy, Height, Phase, ResultBuffer, RunSettings, RunState, Termination, TransportKind,
};
pub use update::update;
