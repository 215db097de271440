//! Keyboard input signal
//!
//! Raw key events collapse to a single paddle direction. Only changes are
//! emitted, so the last emitted value stays valid until the next one.

use std::sync::mpsc::{self, Receiver, Sender};

/// Paddle direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Still,
    Right,
}

impl Direction {
    /// Signed multiplier (-1, 0, +1)
    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Still => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Raw key event with a platform key code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u32),
    KeyUp(u32),
}

/// Change-filtered direction signal
#[derive(Debug, Clone)]
pub struct InputSignal {
    left_key: u32,
    right_key: u32,
    latest: Option<Direction>,
}

impl InputSignal {
    pub fn new(left_key: u32, right_key: u32) -> Self {
        Self {
            left_key,
            right_key,
            latest: None,
        }
    }

    /// Map an event to a direction; returns it only if it changed
    ///
    /// The most recent event wins: releasing any key stops the paddle even
    /// if the opposite key is still held, and pressing a non-movement key
    /// stops it too.
    pub fn handle(&mut self, event: InputEvent) -> Option<Direction> {
        let direction = match event {
            InputEvent::KeyDown(code) if code == self.left_key => Direction::Left,
            InputEvent::KeyDown(code) if code == self.right_key => Direction::Right,
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => Direction::Still,
        };

        if self.latest == Some(direction) {
            return None;
        }
        self.latest = Some(direction);
        Some(direction)
    }

    /// Last emitted direction (`None` before any key event)
    pub fn latest(&self) -> Option<Direction> {
        self.latest
    }
}

/// Sending half handed to an asynchronous keyboard source
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event; returns false once the game loop is gone
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiving half drained by the owning loop before each tick
#[derive(Debug)]
pub struct InputReceiver {
    rx: Receiver<InputEvent>,
}

impl InputReceiver {
    /// Events queued since the last call, in arrival order
    pub fn pending(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Create a connected sender/receiver pair
pub fn channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, InputReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PADDLE_KEY_LEFT, PADDLE_KEY_RIGHT};

    fn signal() -> InputSignal {
        InputSignal::new(PADDLE_KEY_LEFT, PADDLE_KEY_RIGHT)
    }

    #[test]
    fn test_maps_keys() {
        let mut input = signal();
        assert_eq!(input.latest(), None);
        assert_eq!(
            input.handle(InputEvent::KeyDown(PADDLE_KEY_LEFT)),
            Some(Direction::Left)
        );
        assert_eq!(
            input.handle(InputEvent::KeyUp(PADDLE_KEY_LEFT)),
            Some(Direction::Still)
        );
        assert_eq!(
            input.handle(InputEvent::KeyDown(PADDLE_KEY_RIGHT)),
            Some(Direction::Right)
        );
        assert_eq!(input.latest(), Some(Direction::Right));
    }

    #[test]
    fn test_suppresses_duplicates() {
        let mut input = signal();
        assert!(input.handle(InputEvent::KeyDown(PADDLE_KEY_LEFT)).is_some());
        // Key repeat
        assert_eq!(input.handle(InputEvent::KeyDown(PADDLE_KEY_LEFT)), None);
        assert_eq!(input.handle(InputEvent::KeyDown(PADDLE_KEY_LEFT)), None);
        assert!(input.handle(InputEvent::KeyUp(PADDLE_KEY_LEFT)).is_some());
        assert_eq!(input.handle(InputEvent::KeyUp(PADDLE_KEY_RIGHT)), None);
    }

    #[test]
    fn test_last_event_wins() {
        let mut input = signal();
        input.handle(InputEvent::KeyDown(PADDLE_KEY_LEFT));
        input.handle(InputEvent::KeyDown(PADDLE_KEY_RIGHT));
        assert_eq!(input.latest(), Some(Direction::Right));

        // Right still held, but the release is the latest event
        input.handle(InputEvent::KeyUp(PADDLE_KEY_LEFT));
        assert_eq!(input.latest(), Some(Direction::Still));
    }

    #[test]
    fn test_other_keys_stop() {
        let mut input = signal();
        input.handle(InputEvent::KeyDown(PADDLE_KEY_RIGHT));
        assert_eq!(
            input.handle(InputEvent::KeyDown(32)),
            Some(Direction::Still)
        );
    }

    #[test]
    fn test_channel_keeps_latest() {
        let (tx, rx) = channel();
        let mut input = signal();
        assert_eq!(rx.pending().count(), 0);

        assert!(tx.send(InputEvent::KeyDown(PADDLE_KEY_LEFT)));
        assert!(tx.send(InputEvent::KeyUp(PADDLE_KEY_LEFT)));
        assert!(tx.send(InputEvent::KeyDown(PADDLE_KEY_RIGHT)));
        let emitted: Vec<Direction> = rx.pending().filter_map(|e| input.handle(e)).collect();
        assert_eq!(
            emitted,
            vec![Direction::Left, Direction::Still, Direction::Right]
        );
        assert_eq!(rx.pending().count(), 0);
        assert_eq!(input.latest(), Some(Direction::Right));

        drop(rx);
        assert!(!tx.send(InputEvent::KeyUp(PADDLE_KEY_RIGHT)));
    }
}
