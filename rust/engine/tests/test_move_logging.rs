mod common;

use std::sync::{Arc, Mutex};

use chinchon_engine::config::RulesConfig;
use chinchon_engine::deck::{DeckVariant, NoShuffle};
use chinchon_engine::engine::Engine;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use common::{card, pid, scripted};

#[derive(Debug, Clone)]
struct LogEntry {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

impl LogEntry {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
struct Capture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Capture {
    fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.entries.lock().unwrap().push(LogEntry {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

fn captured<T>(f: impl FnOnce() -> T) -> (T, Capture) {
    let capture = Capture::default();
    let subscriber = Registry::default().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}

fn table() -> chinchon_engine::GameState {
    scripted(
        DeckVariant::Standard,
        &[
            ("a", "AH 2H 3H 4H 5H 6H 7H", 0),
            ("b", "KC QD JS 10C 9D 8C 6S", 0),
        ],
        "KS",
        "2C",
    )
}

#[test]
fn rejected_moves_are_logged_with_their_reason() {
    let mut engine = Engine::new(RulesConfig::default(), NoShuffle);
    let state = table();
    let (outcome, logs) = captured(|| engine.draw_from_draw_pile(&state, &pid("b")));
    assert!(!outcome.is_applied());

    let rejected = logs.find("move rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].level, Level::DEBUG);
    assert_eq!(rejected[0].field("player"), Some("b"));
    assert!(rejected[0].field("reason").is_some());
}

#[test]
fn melds_log_scores_and_eliminations() {
    let mut engine = Engine::new(
        RulesConfig {
            elimination_threshold: 30,
            seed: None,
        },
        NoShuffle,
    );
    let state = table();
    let (outcome, logs) = captured(|| {
        let drawn = engine.draw_from_draw_pile(&state, &pid("a")).into_result()?;
        Ok::<_, chinchon_engine::InvalidMove>(engine.meld_hand_with_card(
            &drawn,
            &pid("a"),
            card("KS").id(),
        ))
    });
    assert!(outcome.unwrap().is_applied());

    assert_eq!(logs.find("move applied").len(), 2);
    assert_eq!(logs.find("hand melded").len(), 1);
    assert_eq!(logs.find("round scored").len(), 2);

    let eliminated = logs.find("player eliminated");
    assert_eq!(eliminated.len(), 1);
    assert_eq!(eliminated[0].level, Level::INFO);
    assert_eq!(eliminated[0].field("player"), Some("b"));
    assert_eq!(eliminated[0].field("threshold"), Some("30"));

    let over = logs.find("game over");
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].field("winner"), Some("a"));
}

#[test]
fn setup_logs_the_table() {
    let mut engine = Engine::seeded(RulesConfig::default());
    let roster = common::ids(&["a", "b", "c"]);
    let (state, logs) = captured(|| engine.setup(&roster));
    assert!(state.is_ok());
    let setup = logs.find("game set up");
    assert_eq!(setup.len(), 1);
    assert_eq!(setup[0].field("players"), Some("3"));
    assert_eq!(setup[0].field("variant"), Some("WithJokers"));
}
