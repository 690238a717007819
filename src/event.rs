use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::error::{PickerError, PickerResult};
use crate::items::Item;

pub enum Event {
    Key(KeyEvent),
    Tick,
    /// A spin finished on this item.
    Settled(Item),
}

pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let input_tx = tx.clone();
        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && input_tx.send(Event::Key(key)).is_err() {
                        return;
                    }
                }
            } else if input_tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { tx, rx }
    }

    /// Sender for events raised outside the input thread, like wheel settlements.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> PickerResult<Event> {
        self.rx.recv().await.ok_or(PickerError::EventsClosed)
    }
}
