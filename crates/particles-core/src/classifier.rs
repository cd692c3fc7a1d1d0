//! The classification cycle: the slow, external loop that produces
//! [`GestureState`]s.
//!
//! Recognition itself is delegated to a [`GestureClassifier`]. A worker
//! thread asks it for one result per interval and forwards the result over a
//! channel. Failures never propagate past the worker: the fallback state is
//! sent instead. A second worker applies received states to a
//! [`TargetDirector`], so shape generation stays off the frame thread.

use crate::director::TargetDirector;
use crate::gesture::{demo_sequence, GestureState};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// Source of gesture classifications.
pub trait GestureClassifier: Send + 'static {
    fn name(&self) -> &str;

    /// Produce one classification. Called once per cycle.
    fn classify(&mut self) -> anyhow::Result<GestureState>;
}

/// Returned (inside `anyhow::Error`) when a classifier has nothing more to give.
#[derive(Debug, Error)]
#[error("classifier input exhausted")]
pub struct Exhausted;

/// Cycles through [`demo_sequence`]; handy without a camera or service.
pub struct DemoClassifier {
    states: Vec<GestureState>,
    next: usize,
}

impl DemoClassifier {
    pub fn new() -> Self {
        Self {
            states: demo_sequence(),
            next: 0,
        }
    }
}

impl Default for DemoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureClassifier for DemoClassifier {
    fn name(&self) -> &str {
        "demo"
    }

    fn classify(&mut self) -> anyhow::Result<GestureState> {
        let state = self
            .states
            .get(self.next)
            .cloned()
            .ok_or(Exhausted)?;
        self.next = (self.next + 1) % self.states.len();
        Ok(state)
    }
}

/// Reads one JSON classification per line, e.g. piped from an external
/// recognizer. Blank lines are skipped; end of input is [`Exhausted`].
pub struct JsonLinesClassifier<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> JsonLinesClassifier<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead + Send + 'static> GestureClassifier for JsonLinesClassifier<R> {
    fn name(&self) -> &str {
        "json-lines"
    }

    fn classify(&mut self) -> anyhow::Result<GestureState> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(Exhausted.into());
            }
            let text = self.line.trim();
            if !text.is_empty() {
                return Ok(GestureState::from_json(text));
            }
        }
    }
}

/// Keeps the classification worker alive; dropping it stops the worker.
pub struct ClassificationHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl ClassificationHandle {
    /// Signal the worker and wait for it to exit.
    pub fn stop(self) {
        _ = self.stop_tx.send(());
        if self.thread.join().is_err() {
            log::error!("[classifier] worker panicked");
        }
    }
}

/// Run `classifier` once per `interval` on a worker thread.
///
/// The first classification happens one interval after the call. Every
/// result (or the fallback state, on failure) is sent on the returned
/// receiver. The worker stops when the handle is stopped or dropped, when
/// the receiver is dropped, or after the classifier reports [`Exhausted`].
pub fn spawn_classification_cycle<C: GestureClassifier>(
    mut classifier: C,
    interval: Duration,
) -> std::io::Result<(ClassificationHandle, Receiver<GestureState>)> {
    let (tx, rx) = unbounded();
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let thread = thread::Builder::new()
        .name("gesture-classifier".into())
        .spawn(move || {
            log::info!(
                "[classifier] {} every {:.1}s",
                classifier.name(),
                interval.as_secs_f32()
            );
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let (state, exhausted) = match classifier.classify() {
                    Ok(state) => (state, false),
                    Err(e) => {
                        log::warn!("[classifier] {} failed: {e:#}", classifier.name());
                        (GestureState::fallback(), e.is::<Exhausted>())
                    }
                };
                if tx.send(state).is_err() || exhausted {
                    break;
                }
            }
            log::info!("[classifier] stopped");
        })?;
    Ok((ClassificationHandle { stop_tx, thread }, rx))
}

/// Apply every received state to `director` on a worker thread.
///
/// Exits once all senders are gone.
pub fn spawn_director(
    states: Receiver<GestureState>,
    mut director: TargetDirector,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("target-director".into())
        .spawn(move || {
            for state in states.iter() {
                if let Err(e) = director.apply(&state) {
                    log::error!("[targets] dropping classification: {e}");
                }
            }
        })
}
