use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::BufReader;
use touch_gestured::actions::{self, ActionDispatcher, ActionSink, DispatchError};
use touch_gestured::config::Config;
use touch_gestured::protocol::GestureEvent;
use touch_gestured::server::GestureDaemon;
use touch_gestured::source::{ContactSource, JsonLinesSource};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<GestureEvent>>,
}

#[async_trait]
impl ActionSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, event: GestureEvent) -> actions::Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl ActionSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn deliver(&self, _event: GestureEvent) -> actions::Result<()> {
        Err(DispatchError::Closed)
    }
}

fn source(name: &str, input: &'static str) -> Box<dyn ContactSource> {
    Box::new(JsonLinesSource::new(name, BufReader::new(input.as_bytes())))
}

const LONG_PRESS_AND_DRAG: &str = r#"
# long press on dev0
{"kind":"touch","device_id":"dev0","phase":"down","timestamp":0,"x":100.0,"y":100.0}
{"kind":"touch","device_id":"dev0","phase":"motion","timestamp":50,"x":101.0,"y":101.0}
{"kind":"touch","device_id":"dev0","phase":"motion","timestamp":350,"x":102.0,"y":99.0}
# drag on dev1
{"kind":"touch","device_id":"dev1","phase":"down","timestamp":0,"x":100.0,"y":100.0}
{"kind":"touch","device_id":"dev1","phase":"motion","timestamp":10,"x":130.0,"y":100.0}
{"kind":"touch","device_id":"dev1","phase":"motion","timestamp":900,"x":130.0,"y":100.0}
{"kind":"touch","device_id":"dev1","phase":"up","timestamp":910,"x":130.0,"y":100.0}
"#;

const NATIVE_GESTURES: &str = r#"
{"kind":"gesture","name":"swipe","direction":"left","fingers":3}
this line is not json
{"kind":"gesture","name":"pinch","direction":"out","fingers":4}
"#;

#[tokio::test]
async fn test_daemon_dispatches_long_press_only() {
    let sink = Arc::new(RecordingSink::default());
    let daemon = GestureDaemon::with_sinks(&Config::default(), vec![sink.clone()]);

    let report = daemon
        .run(vec![source("touch", LONG_PRESS_AND_DRAG)])
        .await
        .unwrap();

    assert_eq!(*sink.events.lock(), vec![GestureEvent::new(102, 0, 1)]);
    assert_eq!(report.tracker.long_presses, 1);
    assert_eq!(report.tracker.drags, 1);
    assert_eq!(report.dispatch.submitted, 1);
    assert_eq!(report.dispatch.delivered, 1);
}

#[tokio::test]
async fn test_daemon_relays_native_gestures_and_skips_bad_lines() {
    let sink = Arc::new(RecordingSink::default());
    let daemon = GestureDaemon::with_sinks(&Config::default(), vec![sink.clone()]);

    daemon
        .run(vec![source("gestures", NATIVE_GESTURES)])
        .await
        .unwrap();

    assert_eq!(
        *sink.events.lock(),
        vec![GestureEvent::new(100, 12, 3), GestureEvent::new(101, 15, 4)]
    );
}

const TWO_FINGER_TAP: &str = r#"
{"kind":"touch","device_id":"dev1","phase":"down","timestamp":0,"x":10.0,"y":10.0}
{"kind":"touch","device_id":"dev1","phase":"down","timestamp":5,"x":50.0,"y":10.0}
{"kind":"touch","device_id":"dev1","phase":"up","timestamp":20,"x":50.0,"y":10.0}
"#;

#[tokio::test]
async fn test_report_counts_multi_finger_release() {
    let sink = Arc::new(RecordingSink::default());
    let daemon = GestureDaemon::with_sinks(&Config::default(), vec![sink.clone()]);

    let report = daemon
        .run(vec![source("touch", TWO_FINGER_TAP)])
        .await
        .unwrap();

    assert_eq!(report.tracker.multi_finger_releases, 1);
    assert_eq!(report.dispatch.submitted, 0);
    assert!(sink.events.lock().is_empty());
    report.log();
}

#[tokio::test]
async fn test_daemon_continues_after_invalid_utf8_line() {
    let input: &'static [u8] = b"{\"kind\":\"gesture\",\"name\":\"swipe\",\"direction\":\"up\",\"fingers\":4}\n\xff\xfe\n{\"kind\":\"gesture\",\"name\":\"pinch\",\"direction\":\"in\",\"fingers\":4}\n";
    let sink = Arc::new(RecordingSink::default());
    let daemon = GestureDaemon::with_sinks(&Config::default(), vec![sink.clone()]);

    let sources: Vec<Box<dyn ContactSource>> =
        vec![Box::new(JsonLinesSource::new("bytes", BufReader::new(input)))];
    daemon.run(sources).await.unwrap();

    assert_eq!(
        *sink.events.lock(),
        vec![GestureEvent::new(100, 10, 4), GestureEvent::new(101, 14, 4)]
    );
}

#[tokio::test]
async fn test_daemon_merges_multiple_sources() {
    let sink = Arc::new(RecordingSink::default());
    let daemon = GestureDaemon::with_sinks(&Config::default(), vec![sink.clone()]);

    let report = daemon
        .run(vec![
            source("touch", LONG_PRESS_AND_DRAG),
            source("gestures", NATIVE_GESTURES),
        ])
        .await
        .unwrap();

    let events = sink.events.lock();
    assert_eq!(events.len(), 3);
    assert!(events.contains(&GestureEvent::long_press()));
    assert!(events.contains(&GestureEvent::new(100, 12, 3)));
    assert!(events.contains(&GestureEvent::new(101, 15, 4)));
    assert_eq!(report.dispatch.delivered, 3);
}

#[tokio::test]
async fn test_failing_sink_does_not_block_others() {
    let sink = Arc::new(RecordingSink::default());
    let dispatcher = ActionDispatcher::new(vec![Arc::new(FailingSink), sink.clone()], 8);

    dispatcher.submit(GestureEvent::new(100, 10, 3)).unwrap();
    dispatcher.submit(GestureEvent::new(100, 11, 3)).unwrap();

    let stats = dispatcher.shutdown().await;

    assert_eq!(sink.events.lock().len(), 2);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.delivered, 2);
}
