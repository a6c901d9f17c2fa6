//! Low-level input collection: crossterm polling, mouse-wheel coalescing, and translation
//! into primitive events the input service understands.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Wheel ticks closer together than this are merged into one scroll.
const WHEEL_COALESCE_MS: u64 = 12;
/// Rows moved per wheel tick.
const ROWS_PER_WHEEL_TICK: usize = 3;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Primitive events surfaced by the collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Wheel { direction: ScrollDirection, rows: usize },
}

/// Accumulates consecutive wheel ticks in the same direction.
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    window: Duration,
    pending: Option<(ScrollDirection, usize, Instant)>,
}

impl WheelAccumulator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Add a tick; a direction change hands back the previous run.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        rows: usize,
        now: Instant,
    ) -> Option<(ScrollDirection, usize)> {
        match self.pending.as_mut() {
            Some((pending_dir, pending_rows, last)) if *pending_dir == direction => {
                *pending_rows = pending_rows.saturating_add(rows);
                *last = now;
                None
            }
            _ => {
                let flushed = self.take();
                self.pending = Some((direction, rows, now));
                flushed
            }
        }
    }

    /// Hand back the run once the wheel has been quiet for the window.
    pub fn take_if_quiet(&mut self, now: Instant) -> Option<(ScrollDirection, usize)> {
        match self.pending {
            Some((_, _, last)) if now.duration_since(last) >= self.window => self.take(),
            _ => None,
        }
    }

    pub fn take(&mut self) -> Option<(ScrollDirection, usize)> {
        self.pending.take().map(|(direction, rows, _)| (direction, rows))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Polls crossterm and queues primitive events.
#[derive(Debug)]
pub struct RawInputCollector {
    wheel: WheelAccumulator,
    queue: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(WHEEL_COALESCE_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            wheel: WheelAccumulator::new(window),
            queue: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.wheel.is_empty()
    }

    /// Feed a terminal event without polling (used by tests and the service).
    pub fn process_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.queue.push_back(RawInputEvent::Key(key)),
            Event::Resize(width, height) => {
                self.flush_wheel();
                self.queue.push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse) => self.process_mouse(mouse),
            _ => {}
        }
    }

    /// Next queued event, emitting a finished wheel run first.
    pub fn try_next(&mut self) -> Option<RawInputEvent> {
        self.wheel
            .take_if_quiet(Instant::now())
            .map(|(direction, rows)| RawInputEvent::Wheel { direction, rows })
            .or_else(|| self.queue.pop_front())
    }

    /// Block up to `timeout` for the next event.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_next() {
            return Ok(Some(event));
        }

        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if event::poll(timeout)? {
            let event = event::read()?;
            self.process_event(event);
        }
        Ok(self.try_next())
    }

    fn process_mouse(&mut self, mouse: MouseEvent) {
        let direction = match mouse.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };
        if let Some((direction, rows)) =
            self.wheel
                .push(direction, ROWS_PER_WHEEL_TICK, Instant::now())
        {
            self.queue
                .push_back(RawInputEvent::Wheel { direction, rows });
        }
    }

    fn flush_wheel(&mut self) {
        if let Some((direction, rows)) = self.wheel.take() {
            self.queue
                .push_back(RawInputEvent::Wheel { direction, rows });
        }
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}
