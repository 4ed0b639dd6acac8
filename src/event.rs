use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let forwarded = match event::read() {
                    // Release/repeat events only arrive with keyboard enhancement; presses are enough here.
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                    Ok(_) => Ok(()),
                    Err(_) => return,
                };
                if forwarded.is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
