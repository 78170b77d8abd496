use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::ui::terminal::LineSource;

pub enum AppEvent {
    Input(String),
    Tick,
    /// Standard input was closed.
    Eof,
}

/// Reads stdin lines and produces ticks on helper threads. The threads only send
/// events; the receiver side does all the work.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        let input_tx = tx.clone();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if input_tx.send(AppEvent::Input(line)).is_err() {
                    return;
                }
            }
            let _ = input_tx.send(AppEvent::Eof);
        });

        thread::spawn(move || {
            loop {
                thread::sleep(tick_rate);
                if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

impl LineSource for EventHandler {
    /// Blocks until the next input line, dropping ticks that arrive meanwhile.
    fn next_line(&self) -> Option<String> {
        loop {
            match self.next() {
                Ok(AppEvent::Input(line)) => return Some(line),
                Ok(AppEvent::Tick) => continue,
                Ok(AppEvent::Eof) | Err(_) => return None,
            }
        }
    }
}
