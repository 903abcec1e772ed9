use std::sync::Once;

use fetcher_core::{
    update, Effect, FlushPolicy, LineFormat, Msg, Phase, RunSettings, RunState, Termination,
    TransportKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fetcher_logging::initialize_for_tests);
}

fn body(height: u64, text: &str) -> Msg {
    Msg::BodyReceived {
        height,
        body: text.as_bytes().to_vec(),
    }
}

fn started(settings: RunSettings) -> RunState {
    let (state, effects) = update(RunState::new(settings), Msg::Start);
    assert_eq!(effects, vec![Effect::Fetch { height: 0 }]);
    state
}

#[test]
fn start_requests_height_zero() {
    init_logging();
    let state = started(RunSettings::default());
    assert_eq!(state.cursor(), 0);
    assert_eq!(state.phase(), &Phase::Fetching);
}

#[test]
fn stop_height_zero_halts_without_fetch_or_flush() {
    init_logging();
    let settings = RunSettings {
        stop_height: Some(0),
        ..RunSettings::default()
    };
    let (state, effects) = update(RunState::new(settings), Msg::Start);

    assert_eq!(
        effects,
        vec![Effect::Halt(Termination::StopHeightReached { height: 0 })]
    );
    assert!(state.buffer().is_empty());
}

#[test]
fn parsed_body_advances_cursor_and_requests_next() {
    init_logging();
    let state = started(RunSettings::default());
    let (state, effects) = update(state, body(0, r#"{"height":0,"hash":"a1"}"#));

    assert_eq!(
        effects,
        vec![
            Effect::RecordParsed {
                height: 0,
                record: json!({"height": 0, "hash": "a1"}),
            },
            Effect::Fetch { height: 1 },
        ]
    );
    assert_eq!(state.cursor(), 1);
    assert_eq!(state.buffer().len(), 1);
}

#[test]
fn parse_failure_flushes_collected_records_in_order() {
    init_logging();
    let state = started(RunSettings::default());
    let (state, _) = update(state, body(0, r#"{"height":0,"hash":"a1"}"#));
    let (state, _) = update(state, body(1, r#"{"height":1,"hash":"b2"}"#));
    let (state, effects) = update(state, body(2, "ERR"));

    assert_eq!(effects.len(), 2);
    assert_eq!(
        effects[0],
        Effect::Flush {
            content: "{\"height\":0,\"hash\":\"a1\"}\n{\"height\":1,\"hash\":\"b2\"}"
                .to_string(),
            records: 2,
        }
    );
    match &effects[1] {
        Effect::Halt(Termination::ParseFailure { height, .. }) => assert_eq!(*height, 2),
        other => panic!("unexpected effect {other:?}"),
    }
    assert!(matches!(
        state.termination(),
        Some(Termination::ParseFailure { height: 2, .. })
    ));
}

#[test]
fn parse_failure_at_height_zero_flushes_empty_content() {
    init_logging();
    let state = started(RunSettings::default());
    let (_, effects) = update(state, body(0, ""));

    assert_eq!(
        effects[0],
        Effect::Flush {
            content: String::new(),
            records: 0,
        }
    );
}

#[test]
fn transport_failure_discards_buffer_by_default() {
    init_logging();
    let state = started(RunSettings::default());
    let (state, _) = update(state, body(0, "\"00aa\""));
    let (state, effects) = update(
        state,
        Msg::TransportFailed {
            height: 1,
            kind: TransportKind::Network,
            message: "connection refused".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Halt(Termination::Transport {
            height: 1,
            kind: TransportKind::Network,
            message: "connection refused".to_string(),
        })]
    );
    assert_eq!(state.buffer().len(), 1);
}

#[test]
fn flush_on_any_termination_writes_at_stop_height() {
    init_logging();
    let settings = RunSettings {
        stop_height: Some(2),
        flush_policy: FlushPolicy::OnAnyTermination,
        line_format: LineFormat::Plain,
    };
    let state = started(settings);
    let (state, _) = update(state, body(0, "\"00aa\""));
    let (_, effects) = update(state, body(1, "\"00bb\""));

    assert_eq!(
        effects,
        vec![
            Effect::RecordParsed {
                height: 1,
                record: json!("00bb"),
            },
            Effect::Flush {
                content: "00aa\n00bb".to_string(),
                records: 2,
            },
            Effect::Halt(Termination::StopHeightReached { height: 2 }),
        ]
    );
}

#[test]
fn stale_height_is_ignored() {
    init_logging();
    let state = started(RunSettings::default());
    let (next, effects) = update(state.clone(), body(3, "{}"));

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn identical_bodies_render_identical_content() {
    init_logging();
    let run = || {
        let state = started(RunSettings::default());
        let (state, _) = update(state, body(0, "[1, 2, 3]"));
        let (_, effects) = update(state, body(1, "<html>"));
        effects
    };
    assert_eq!(run(), run());
}

#[test]
fn flushed_records_keep_server_key_order() {
    init_logging();
    let state = started(RunSettings::default());
    let (state, _) = update(state, body(0, r#"{"height":0,"hash":"a1","prev":null}"#));
    let (_, effects) = update(state, body(1, "ERR"));

    assert_eq!(
        effects[0],
        Effect::Flush {
            content: r#"{"height":0,"hash":"a1","prev":null}"#.to_string(),
            records: 1,
        }
    );
}

#[test]
fn stop_height_with_records_halts_without_flush_by_default() {
    init_logging();
    let settings = RunSettings {
        stop_height: Some(2),
        ..RunSettings::default()
    };
    let state = started(settings);
    let (state, _) = update(state, body(0, "\"00aa\""));
    let (state, effects) = update(state, body(1, "\"00bb\""));

    assert_eq!(
        effects,
        vec![
            Effect::RecordParsed {
                height: 1,
                record: json!("00bb"),
            },
            Effect::Halt(Termination::StopHeightReached { height: 2 }),
        ]
    );
    assert_eq!(state.buffer().len(), 2);
}

#[test]
fn flush_on_any_termination_writes_on_transport_failure() {
    init_logging();
    let settings = RunSettings {
        flush_policy: FlushPolicy::OnAnyTermination,
        ..RunSettings::default()
    };
    let state = started(settings);
    let (state, _) = update(state, body(0, "\"00aa\""));
    let (_, effects) = update(
        state,
        Msg::TransportFailed {
            height: 1,
            kind: TransportKind::Timeout,
            message: "operation timed out".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::Flush {
                content: "\"00aa\"".to_string(),
                records: 1,
            },
            Effect::Halt(Termination::Transport {
                height: 1,
                kind: TransportKind::Timeout,
                message: "operation timed out".to_string(),
            }),
        ]
    );
}
