use tokio::sync::watch;

/// Counts successful writes. Observers reload the token list whenever it moves.
#[derive(Debug, Clone)]
pub struct ChangeCounter {
    tx: watch::Sender<u64>,
}

impl ChangeCounter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn increment(&self) -> u64 {
        self.tx.send_modify(|count| *count += 1);
        self.value()
    }

    pub fn value(&self) -> u64 {
        *self.tx.borrow()
    }

    /// The returned receiver has already seen the current value
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeCounter {
    fn default() -> Self {
        Self::new()
    }
}
