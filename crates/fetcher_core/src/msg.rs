use crate::{Height, TransportKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the run at the current cursor.
    Start,
    /// The full response body for `height` has arrived.
    BodyReceived { height: Height, body: Vec<u8> },
    /// The request for `height` failed before a body was available.
    TransportFailed {
        height: Height,
        kind: TransportKind,
        message: String,
    },
}
