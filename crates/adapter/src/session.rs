//! Session - drives one round from async commands and timers
//!
//! The session owns the [`Round`] and three timers:
//!
//! - the countdown [`Ticker`], running only while a round is in play
//! - the resolve deadline, armed when a pair is selected
//! - the unlock deadline, armed when a pair fails to match
//!
//! From the second pick until the selection is released the processing lock
//! is held and picks are answered with an `ignored` selection event. Board and
//! score changes are applied in one step when the resolve deadline fires; a
//! failed pair stays selected until the unlock deadline releases it.

use std::future::pending;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use tile_link_core::{Round, RoundEnd, SimpleRng};
use tile_link_engine::find_hint;
use tile_link_types::Point;

use crate::config::SessionConfig;
use crate::protocol::{
    create_error, create_hint, create_match, create_round_ended, create_round_started,
    create_selection, create_selection_cleared, create_snapshot, create_time, Command, ErrorCode,
    Event, EventMessage,
};

/// Inbound queue depth
pub const COMMAND_QUEUE: usize = 64;

/// What the session reads from its inbound queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    /// A line that failed to parse, with the parser's message
    Malformed(String),
}

impl From<Command> for Inbound {
    fn from(cmd: Command) -> Self {
        Inbound::Command(cmd)
    }
}

/// Periodic countdown source; dropping it cancels the schedule
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// First tick fires one full `period` from now
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}

async fn next_tick(ticker: &mut Option<Ticker>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => pending::<()>().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => pending::<()>().await,
    }
}

/// One client's game session
pub struct Session {
    config: SessionConfig,
    round: Round,
    rng: SimpleRng,
    ticker: Option<Ticker>,
    resolve_at: Option<Instant>,
    unlock_at: Option<Instant>,
    seq: u64,
    events: mpsc::UnboundedSender<EventMessage>,
    log: Option<mpsc::UnboundedSender<EventMessage>>,
}

impl Session {
    pub fn new(config: SessionConfig, events: mpsc::UnboundedSender<EventMessage>) -> Self {
        Self {
            round: Round::new(config.round),
            rng: SimpleRng::from_entropy(),
            ticker: None,
            resolve_at: None,
            unlock_at: None,
            seq: 0,
            events,
            log: None,
            config,
        }
    }

    /// Use `rng` for rounds started without an explicit seed
    pub fn with_rng(mut self, rng: SimpleRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// True while a pair is being resolved or a failed pair is on display
    pub fn is_locked(&self) -> bool {
        self.round.selection().is_resolving()
    }

    /// Process commands and timers until `quit` or the inbound queue closes
    ///
    /// Returns the round as it stood when the session stopped.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<Inbound>) -> Round {
        if let Some(path) = self.config.log_path.clone() {
            self.log = Some(spawn_event_log(path));
        }
        debug!(
            resolve_delay_ms = self.config.resolve_delay_ms,
            feedback_pause_ms = self.config.feedback_pause_ms,
            tick_ms = self.config.tick_ms,
            "session started"
        );

        loop {
            let resolve_at = self.resolve_at;
            let unlock_at = self.unlock_at;
            tokio::select! {
                biased;
                msg = inbound.recv() => match msg {
                    None | Some(Inbound::Command(Command::Quit)) => break,
                    Some(Inbound::Command(cmd)) => self.handle(cmd),
                    Some(Inbound::Malformed(reason)) => {
                        self.emit(create_error(ErrorCode::InvalidCommand, &reason));
                    }
                },
                _ = wait_until(resolve_at) => self.resolve_pending(),
                _ = wait_until(unlock_at) => self.release_lock(),
                _ = next_tick(&mut self.ticker) => self.on_tick(),
            }
        }

        self.ticker = None;
        info!(
            round_id = self.round.round_id(),
            score = self.round.score(),
            "session closed"
        );
        self.round
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::NewRound { seed } => self.new_round(seed),
            Command::Pick { x, y } => self.pick(Point::new(x, y)),
            Command::Hint => self.hint(),
            Command::Snapshot => {
                let snap = self.round.snapshot();
                self.emit(create_snapshot(&snap));
            }
            Command::Quit => {}
        }
    }

    fn new_round(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = SimpleRng::new(seed);
        }
        self.round.restart(&mut self.rng);
        self.resolve_at = None;
        self.unlock_at = None;
        self.ticker = Some(Ticker::new(Duration::from_millis(self.config.tick_ms)));

        let snap = self.round.snapshot();
        self.emit(create_round_started(&snap));
    }

    fn pick(&mut self, point: Point) {
        if !self.round.is_playing() {
            self.emit(create_error(ErrorCode::NotPlaying, "no round in progress"));
            return;
        }
        let event = self.round.pick(point);
        if event.is_pair_ready() {
            self.resolve_at =
                Some(Instant::now() + Duration::from_millis(self.config.resolve_delay_ms));
        }

        let selected: Vec<Point> = self
            .round
            .selection()
            .picks()
            .iter()
            .map(|p| p.point)
            .collect();
        let round_id = self.round.round_id();
        self.emit(create_selection(round_id, point, &event, &selected));
    }

    fn hint(&mut self) {
        if !self.round.is_playing() {
            self.emit(create_error(ErrorCode::NotPlaying, "no round in progress"));
            return;
        }
        let hint = find_hint(self.round.board());
        let round_id = self.round.round_id();
        self.emit(create_hint(round_id, hint.as_ref()));
    }

    fn resolve_pending(&mut self) {
        self.resolve_at = None;
        let Some(res) = self.round.resolve() else {
            return;
        };
        let round_id = self.round.round_id();
        self.emit(create_match(round_id, &res.outcome, res.score));

        if let Some(end) = res.ended {
            self.end_round(end);
        } else if !res.outcome.matched() {
            self.unlock_at =
                Some(Instant::now() + Duration::from_millis(self.config.feedback_pause_ms));
        }
    }

    fn release_lock(&mut self) {
        self.unlock_at = None;
        if !self.round.release_selection() {
            return;
        }
        let round_id = self.round.round_id();
        self.emit(create_selection_cleared(round_id));
    }

    fn on_tick(&mut self) {
        let update = self.round.tick();
        let round_id = self.round.round_id();
        self.emit(create_time(round_id, update));
        if update.expired {
            match self.round.end() {
                Some(end) => self.end_round(end),
                None => self.ticker = None,
            }
        }
    }

    fn end_round(&mut self, end: RoundEnd) {
        self.ticker = None;
        self.resolve_at = None;
        self.unlock_at = None;
        let round_id = self.round.round_id();
        self.emit(create_round_ended(round_id, end));
    }

    fn emit(&mut self, event: Event) {
        self.seq += 1;
        let msg = EventMessage {
            seq: self.seq,
            event,
        };
        let log_closed = self
            .log
            .as_ref()
            .is_some_and(|log| log.send(msg.clone()).is_err());
        if log_closed {
            warn!(seq = self.seq, "event log stopped, no longer recording");
            self.log = None;
        }
        if self.events.send(msg).is_err() {
            debug!(seq = self.seq, "event receiver dropped");
        }
    }
}

/// Append every event to `path` as one JSON line
fn spawn_event_log(path: String) -> mpsc::UnboundedSender<EventMessage> {
    let (tx, mut rx) = mpsc::unbounded_channel::<EventMessage>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(err) => {
                warn!(path = %path, error = %err, "event log unavailable");
                return;
            }
        };

        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if let Err(err) = serde_json::to_writer(&mut buf, &msg) {
                warn!(seq = msg.seq, error = %err, "event not logged");
                continue;
            }
            buf.push(b'\n');
            if let Err(err) = file.write_all(&buf).await {
                warn!(path = %path, error = %err, "event log write failed");
                return;
            }
        }
        if let Err(err) = file.flush().await {
            warn!(path = %path, error = %err, "event log flush failed");
        }
    });
    tx
}

/// A session running on its own task
pub struct SessionHandle {
    pub inbound: mpsc::Sender<Inbound>,
    pub events: mpsc::UnboundedReceiver<EventMessage>,
    pub task: JoinHandle<Round>,
}

impl SessionHandle {
    /// Queue a command; false once the session has stopped
    pub async fn send(&self, cmd: Command) -> bool {
        self.inbound.send(cmd.into()).await.is_ok()
    }

    /// Next event, or `None` after the session has stopped
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await.map(|m| m.event)
    }
}

/// Spawn a session on the current runtime
pub fn spawn_session(config: SessionConfig, rng: SimpleRng) -> SessionHandle {
    let (inbound_tx, inbound_rx) = mpsc::channel(COMMAND_QUEUE);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session = Session::new(config, event_tx).with_rng(rng);
    let task = tokio::spawn(session.run(inbound_rx));
    SessionHandle {
        inbound: inbound_tx,
        events: event_rx,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_link_core::RoundConfig;

    fn config() -> SessionConfig {
        SessionConfig {
            round: RoundConfig {
                board_size: 4,
                kinds: 2,
                reserve: 0,
                round_secs: 3,
                ..RoundConfig::default()
            },
            ..SessionConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pick_before_round_is_rejected() {
        let mut handle = spawn_session(config(), SimpleRng::new(1));
        assert!(handle.send(Command::Pick { x: 0, y: 0 }).await);
        match handle.next_event().await {
            Some(Event::Error(err)) => assert_eq!(err.code, ErrorCode::NotPlaying),
            other => panic!("unexpected event: {:?}", other),
        }
        handle.send(Command::Quit).await;
        let round = handle.task.await.unwrap();
        assert_eq!(round.round_id(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ends_round_and_stops() {
        let mut handle = spawn_session(config(), SimpleRng::new(1));
        handle.send(Command::NewRound { seed: Some(5) }).await;
        assert!(matches!(
            handle.next_event().await,
            Some(Event::RoundStarted(_))
        ));

        let start = Instant::now();
        for expected in [2u32, 1, 0] {
            match handle.next_event().await {
                Some(Event::Time(t)) => assert_eq!(t.remaining_secs, expected),
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        match handle.next_event().await {
            Some(Event::RoundEnded(end)) => assert_eq!(end.result, "timeUp"),
            other => panic!("unexpected event: {:?}", other),
        }

        // No further ticks once the round is over.
        let quiet = tokio::time::timeout(Duration::from_secs(10), handle.next_event()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test]
    async fn test_closed_event_log_is_dropped() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut session = Session::new(config(), event_tx);
        let (log_tx, log_rx) = mpsc::unbounded_channel();
        drop(log_rx);
        session.log = Some(log_tx);

        session.emit(create_selection_cleared(0));
        assert!(session.log.is_none());
        session.emit(create_selection_cleared(0));

        assert_eq!(event_rx.recv().await.map(|m| m.seq), Some(1));
        assert_eq!(event_rx.recv().await.map(|m| m.seq), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_line_reports_error() {
        let mut handle = spawn_session(config(), SimpleRng::new(1));
        handle
            .inbound
            .send(Inbound::Malformed("expected value".to_string()))
            .await
            .unwrap();
        match handle.next_event().await {
            Some(Event::Error(err)) => {
                assert_eq!(err.code, ErrorCode::InvalidCommand);
                assert_eq!(err.message, "expected value");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
