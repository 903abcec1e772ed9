use serde_json::Value;

use crate::{Height, Termination};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue `GET /block-hash?height={height}`.
    Fetch { height: Height },
    /// A body parsed and was appended to the buffer.
    RecordParsed { height: Height, record: Value },
    /// Write `content` to the target destination, replacing what is there.
    Flush { content: String, records: usize },
    /// The run is over; nothing follows this effect.
    Halt(Termination),
}
