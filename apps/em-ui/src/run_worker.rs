use em_app::{ParameterSet, SimulationResult};
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// One simulation running off the UI thread.
///
/// Dropping the worker drops its receiver; a superseded run finishes in the
/// background and its result is discarded.
pub struct RunWorker {
    pub generation: u64,
    rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

#[derive(Debug)]
pub enum WorkerMessage {
    Complete {
        generation: u64,
        result: Box<SimulationResult>,
        elapsed_s: f64,
    },
    Error {
        generation: u64,
        message: String,
    },
}

impl WorkerMessage {
    fn generation(&self) -> u64 {
        match self {
            WorkerMessage::Complete { generation, .. } | WorkerMessage::Error { generation, .. } => {
                *generation
            }
        }
    }
}

/// State of a worker as seen from the UI thread.
#[derive(Debug)]
pub enum WorkerPoll {
    Pending,
    Finished(WorkerMessage),
    /// The thread ended without reporting (it panicked).
    Lost,
}

impl RunWorker {
    pub fn start(generation: u64, params: ParameterSet) -> Self {
        Self::spawn(generation, move |tx| {
            Self::run_simulation(generation, &params, tx)
        })
    }

    fn spawn<F>(generation: u64, job: F) -> Self
    where
        F: FnOnce(&Sender<WorkerMessage>) + Send + 'static,
    {
        let (tx, rx) = channel();
        let handle = thread::spawn(move || job(&tx));

        Self {
            generation,
            rx,
            _handle: handle,
        }
    }

    /// Check for this worker's outcome without blocking.
    pub fn poll(&self) -> WorkerPoll {
        loop {
            match self.rx.try_recv() {
                Ok(msg) if msg.generation() == self.generation => {
                    return WorkerPoll::Finished(msg);
                }
                Ok(_) => continue,
                Err(TryRecvError::Empty) => return WorkerPoll::Pending,
                Err(TryRecvError::Disconnected) => return WorkerPoll::Lost,
            }
        }
    }

    fn run_simulation(generation: u64, params: &ParameterSet, tx: &Sender<WorkerMessage>) {
        let started = Instant::now();
        let msg = match em_app::run_parameter_set(params) {
            Ok(result) => WorkerMessage::Complete {
                generation,
                result: Box::new(result),
                elapsed_s: started.elapsed().as_secs_f64(),
            },
            Err(e) => WorkerMessage::Error {
                generation,
                message: e.to_string(),
            },
        };
        if tx.send(msg).is_err() {
            tracing::debug!(generation, "run superseded before completion");
        }
    }
}
