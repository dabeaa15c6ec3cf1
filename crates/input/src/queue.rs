//! Single-consumer command queue.
//!
//! Producers (input threads, touch bridges, scripted bots) hold cloned [`CommandSender`]s.
//! The simulation thread owns the [`CommandQueue`] and replays everything pending, in
//! arrival order, before each tick. Move/rotate order changes outcomes, so commands are
//! never reordered or coalesced.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::types::GameCommand;

/// Producer handle; cheap to clone and `Send`
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<GameCommand>,
}

impl CommandSender {
    /// Enqueue a command; false once the queue has been dropped
    pub fn send(&self, command: GameCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Consumer side, owned by the simulation thread
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<GameCommand>,
    rx: Receiver<GameCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Enqueue from the consumer's own thread
    pub fn push(&self, command: GameCommand) {
        // The receiver lives in `self`, so the channel is always open here.
        let _ = self.tx.send(command);
    }

    /// Pending commands in arrival order, without blocking
    pub fn drain(&self) -> impl Iterator<Item = GameCommand> + '_ {
        self.rx.try_iter()
    }

    /// Apply every pending command in arrival order; returns how many changed state
    pub fn drain_with(&self, mut apply: impl FnMut(GameCommand) -> bool) -> usize {
        self.drain().filter(|&command| apply(command)).count()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        sender.send(GameCommand::RotateCw);
        sender.send(GameCommand::MoveLeft);
        queue.push(GameCommand::HardDrop);

        let drained: Vec<GameCommand> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                GameCommand::RotateCw,
                GameCommand::MoveLeft,
                GameCommand::HardDrop
            ]
        );
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_drain_with_counts_changes() {
        let queue = CommandQueue::new();
        queue.push(GameCommand::MoveLeft);
        queue.push(GameCommand::MoveLeft);
        queue.push(GameCommand::Pause);

        let mut seen = Vec::new();
        let changed = queue.drain_with(|command| {
            seen.push(command);
            command == GameCommand::Pause
        });
        assert_eq!(changed, 1);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_sender_from_other_thread() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        let handle = thread::spawn(move || {
            for _ in 0..10 {
                assert!(sender.send(GameCommand::SoftDrop));
            }
        });
        handle.join().unwrap();
        assert_eq!(queue.drain().count(), 10);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(GameCommand::Pause));
    }
}
