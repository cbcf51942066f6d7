//! Pending invocations of a deferred tag

use crossbeam_channel::{unbounded, Receiver, Sender};
use kitsy_engine::Value;

/// One tag invocation captured while dialogue was running
#[derive(Debug, Clone, PartialEq)]
pub struct TagCall {
    pub environment: Value,
    pub parameters: Vec<Value>,
}

/// FIFO of pending calls for a deferred tag
pub(crate) struct DeferredQueue {
    sender: Sender<TagCall>,
    receiver: Receiver<TagCall>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn push(&self, call: TagCall) {
        if let Err(e) = self.sender.send(call) {
            tracing::error!("Deferred tag queue disconnected: {}", e);
        }
    }

    /// Run `handler` for every pending call in FIFO order
    ///
    /// Calls queued by the handler itself are drained in the same pass.
    pub fn drain<F>(&self, mut handler: F) -> usize
    where
        F: FnMut(TagCall),
    {
        let mut count = 0;
        while let Ok(call) = self.receiver.try_recv() {
            handler(call);
            count += 1;
        }
        count
    }

    /// Discard every pending call without running it
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(n: i64) -> TagCall {
        TagCall {
            environment: Value::Null,
            parameters: vec![json!(n)],
        }
    }

    #[test]
    fn test_drain_fifo() {
        let queue = DeferredQueue::new();
        queue.push(call(1));
        queue.push(call(2));
        queue.push(call(3));

        let mut seen = Vec::new();
        assert_eq!(queue.drain(|c| seen.push(c.parameters[0].clone())), 3);
        assert_eq!(seen, [json!(1), json!(2), json!(3)]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_clear_discards() {
        let queue = DeferredQueue::new();
        queue.push(call(1));
        queue.push(call(2));

        assert_eq!(queue.clear(), 2);
        assert_eq!(queue.drain(|_| panic!("cleared call ran")), 0);
    }
}
