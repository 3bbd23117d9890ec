use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};
use log::debug;

/// Fastest tick the timer popup redraws at.
const MIN_TICK: Duration = Duration::from_millis(16);

#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Keep key presses and resizes; drop key releases, mouse and focus events.
fn translate(raw: CEvent) -> Option<Event> {
    match raw {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Schedules ticks so the reading timer keeps moving between key presses.
#[derive(Debug, Clone, Copy)]
struct TickClock {
    rate: Duration,
    last: Instant,
}

impl TickClock {
    fn new(rate: Duration, now: Instant) -> Self {
        Self {
            rate: rate.max(MIN_TICK),
            last: now,
        }
    }

    /// How long input polling may block before the next tick is due.
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.rate.saturating_sub(now.duration_since(self.last))
    }

    fn take_tick(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) >= self.rate {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Terminal input and ticks merged onto one channel by a reader thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut clock = TickClock::new(Duration::from_millis(tick_rate_ms), Instant::now());

        thread::spawn(move || {
            loop {
                let ready = event::poll(clock.poll_timeout(Instant::now())).unwrap_or(false);
                let input = if ready {
                    match event::read() {
                        Ok(raw) => translate(raw),
                        Err(e) => {
                            debug!("terminal input closed: {}", e);
                            break;
                        }
                    }
                } else {
                    None
                };
                let tick = clock.take_tick(Instant::now()).then_some(Event::Tick);

                // Receiver gone means the app has quit
                if input.into_iter().chain(tick).any(|ev| tx.send(ev).is_err()) {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
