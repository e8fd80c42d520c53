// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Background generation.
//!
//! A `Runner` takes a copy of a configuration, renders it on a worker
//! thread, times the render, and hands the result to a listener.  At
//! most one job is outstanding per runner: the runner owns a single
//! token in a one-slot channel, `start` has to take it, and the worker
//! puts it back once the listener has been told.  A second `start`
//! while the token is out is refused with `AlreadyRunning`.
//!
//! There is no cancellation and no timeout.  A job runs for as long as
//! its `width * height * max_iterations` requires.

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, error, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use buffer::PixelBuffer;
use config::GeneratorConfig;
use errors::JuliaError;
use generator::generate;

/// A successful background render.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// The finished image, shared read-only with whoever displays it.
    pub image: Arc<PixelBuffer>,
    /// Wall-clock time the render took, in milliseconds.
    pub duration_ms: u64,
}

/// What a listener is told when a job retires.
pub type Outcome = Result<Rendered, JuliaError>;

type Listener = Arc<dyn Fn(Outcome) + Send + Sync>;
type Render = fn(&GeneratorConfig) -> Result<PixelBuffer, JuliaError>;

/// Runs one generation at a time off the calling thread.
pub struct Runner {
    listener: Listener,
    render: Render,
    token_tx: Sender<()>,
    token_rx: Receiver<()>,
    last_duration: Arc<Mutex<Option<u64>>>,
}

/// Returns the token when the job is done with it, whether the job
/// finished, failed, or the listener itself panicked.
struct Retire(Sender<()>);

impl Drop for Retire {
    fn drop(&mut self) {
        // The slot is empty while a job holds the token.
        let _ = self.0.try_send(());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

impl Runner {
    /// A runner that reports every finished job to `listener`.  The
    /// listener is called on the worker thread, and the job counts as
    /// outstanding until the listener returns.
    pub fn new<F>(listener: F) -> Self
    where
        F: Fn(Outcome) + Send + Sync + 'static,
    {
        Runner::with_render(listener, generate)
    }

    /// A runner whose outcomes arrive on a channel, for callers that
    /// would rather poll or block on a receiver than be called back.
    pub fn with_channel() -> (Self, Receiver<Outcome>) {
        let (tx, rx) = unbounded();
        let runner = Runner::new(move |outcome| {
            if tx.send(outcome).is_err() {
                debug!("outcome dropped, nobody is listening");
            }
        });
        (runner, rx)
    }

    pub(crate) fn with_render<F>(listener: F, render: Render) -> Self
    where
        F: Fn(Outcome) + Send + Sync + 'static,
    {
        let (token_tx, token_rx) = bounded(1);
        // A fresh bounded(1) channel always has room for the token.
        let _ = token_tx.try_send(());
        Runner {
            listener: Arc::new(listener),
            render,
            token_tx,
            token_rx,
            last_duration: Arc::new(Mutex::new(None)),
        }
    }

    /// Snapshots `config` and renders it on a new thread.  Returns as
    /// soon as the worker is launched.  Fails only if a job is already
    /// outstanding; every other failure arrives through the listener.
    pub fn start(&self, config: &GeneratorConfig) -> Result<(), JuliaError> {
        if self.token_rx.try_recv().is_err() {
            warn!("generation requested while another is running");
            return Err(JuliaError::AlreadyRunning);
        }
        let retire = Retire(self.token_tx.clone());
        let snapshot = *config;
        let listener = Arc::clone(&self.listener);
        let last_duration = Arc::clone(&self.last_duration);
        let render = self.render;

        debug!("starting generation: {:?}", snapshot);
        let spawned = thread::Builder::new()
            .name("julia-worker".to_string())
            .spawn(move || {
                let _retire = retire;
                let started = Instant::now();
                let result = panic::catch_unwind(AssertUnwindSafe(|| render(&snapshot)));
                let elapsed = started.elapsed();
                let duration_ms = elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis());

                let outcome = match result {
                    Ok(Ok(image)) => {
                        info!(
                            "generated {}x{} in {} ms",
                            image.width(),
                            image.height(),
                            duration_ms
                        );
                        match last_duration.lock() {
                            Ok(mut last) => *last = Some(duration_ms),
                            Err(poisoned) => *poisoned.into_inner() = Some(duration_ms),
                        }
                        Ok(Rendered {
                            image: Arc::new(image),
                            duration_ms,
                        })
                    }
                    Ok(Err(err)) => {
                        error!("generation rejected: {}", err);
                        Err(err)
                    }
                    Err(payload) => {
                        let message = panic_message(&*payload);
                        error!("generation failed: {}", message);
                        Err(JuliaError::GenerationFailed(message))
                    }
                };
                (*listener)(outcome);
            });

        // If the thread could not be launched, the closure (and the
        // token inside it) has already been dropped.
        spawned
            .map(|_| ())
            .map_err(|err| JuliaError::GenerationFailed(err.to_string()))
    }

    /// True while a job is outstanding.
    pub fn is_running(&self) -> bool {
        self.token_rx.is_empty()
    }

    /// Blocks until the outstanding job, if any, has retired.
    pub fn wait(&self) {
        if self.token_rx.recv().is_ok() {
            let _ = self.token_tx.try_send(());
        }
    }

    /// Duration of the most recent successful render, or `None` before
    /// the first one.
    pub fn last_duration_ms(&self) -> Option<u64> {
        match self.last_duration.lock() {
            Ok(last) => *last,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
