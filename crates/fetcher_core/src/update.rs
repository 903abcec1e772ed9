use serde_json::Value;

use crate::{render_lines, Effect, Height, Msg, RunState, Termination};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    // A terminated run never produces further effects.
    if state.is_terminated() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Start => next_step(&mut state),
        Msg::BodyReceived { height, body } => {
            if height != state.cursor() {
                return (state, Vec::new());
            }
            match serde_json::from_slice::<Value>(&body) {
                Ok(record) => {
                    state.accept(record.clone());
                    let mut effects = vec![Effect::RecordParsed { height, record }];
                    effects.extend(next_step(&mut state));
                    effects
                }
                Err(err) => terminate(
                    &mut state,
                    Termination::ParseFailure {
                        height,
                        reason: err.to_string(),
                    },
                ),
            }
        }
        Msg::TransportFailed {
            height,
            kind,
            message,
        } => {
            if height != state.cursor() {
                return (state, Vec::new());
            }
            terminate(
                &mut state,
                Termination::Transport {
                    height,
                    kind,
                    message,
                },
            )
        }
    };

    (state, effects)
}

fn next_step(state: &mut RunState) -> Vec<Effect> {
    if state.stop_height_reached() {
        let height: Height = state.cursor();
        return terminate(state, Termination::StopHeightReached { height });
    }
    vec![Effect::Fetch {
        height: state.cursor(),
    }]
}

fn terminate(state: &mut RunState, termination: Termination) -> Vec<Effect> {
    let settings = state.settings();
    let mut effects = Vec::with_capacity(2);
    if termination.should_flush(settings.flush_policy) {
        let records = state.buffer().records();
        effects.push(Effect::Flush {
            content: render_lines(records, settings.line_format),
            records: records.len(),
        });
    }
    state.terminate(termination.clone());
    effects.push(Effect::Halt(termination));
    effects
}
