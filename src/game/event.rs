//! Gameplay events
//!
//! The simulation reports notable moments (jumps, landings, head bumps,
//! respawns) as events instead of calling into logging or drawing code.
//! The frame loop drains them once per rendered frame.

use crate::geom::Rect;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that happened to the player during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Left the ground or jumped again in mid-air; `count` is 1 or 2
    Jumped { count: u32 },
    /// Came down onto a block after a jump or a real fall
    Landed { speed: f32 },
    /// Hit the underside of a block while rising
    Bonked,
    /// Fell out of the world and was put back at the start
    Respawned { from: Rect },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(queue.drain().count(), 0);
    }
}
