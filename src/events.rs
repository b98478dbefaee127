use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::calendar::MonthIndex;
use crate::config::Config;
use crate::counts::PostCounts;

pub enum Event {
    /// Periodic tick; lets a long-lived pane keep "today" current.
    Update,
    /// A count-lookup response, stamped with the request it answers.
    CountsLoaded {
        month: MonthIndex,
        generation: u64,
        counts: PostCounts,
    },
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    _update_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        Dispatcher::new(config.tick_rate())
    }

    pub fn new(tick_rate: Duration) -> Dispatcher {
        let (tx, rx) = mpsc::channel();

        let tx_upd = tx.clone();
        let update_handle = thread::spawn(move || loop {
            thread::sleep(tick_rate);
            if tx_upd.send(Event::Update).is_err() {
                return;
            }
        });

        Dispatcher {
            rx,
            tx,
            _update_handle: update_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Result<Event, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}
