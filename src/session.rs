//! View state owned by the presentation layer.
//!
//! A `ViewSession` keeps the current options, the last list that was successfully
//! built, and a generation counter. Every option change starts a new generation;
//! results that come back for an older generation are dropped, so a slow early
//! response can never overwrite a later one. A failed fetch keeps the previous list.

use crate::api::DataSource;
use crate::error::FetchError;
use crate::models::{ViewCountry, ViewOptions};
use crate::pipeline::{self, DEFAULT_LOCALE};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

/// Identifies one request; handed out by [`ViewSession::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub options: ViewOptions,
}

/// What happened when a finished request was handed back to the session.
#[derive(Debug)]
pub enum Completion {
    /// The list was replaced; carries the new count.
    Applied(usize),
    /// A newer request had already started; the result was ignored.
    Stale,
    /// The fetch failed; the previous list is still shown.
    Failed(FetchError),
}

type Finished = (Ticket, Result<Vec<ViewCountry>, FetchError>);

pub struct ViewSession {
    options: ViewOptions,
    countries: Vec<ViewCountry>,
    generation: u64,
    locale: String,
    in_flight: usize,
    sender: mpsc::Sender<Finished>,
    receiver: mpsc::Receiver<Finished>,
}

impl ViewSession {
    pub fn new(options: ViewOptions) -> Self {
        Self::with_locale(options, DEFAULT_LOCALE)
    }

    pub fn with_locale(options: ViewOptions, locale_tag: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            options,
            countries: Vec::new(),
            generation: 0,
            locale: locale_tag.into(),
            in_flight: 0,
            sender,
            receiver,
        }
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Last successfully built list (empty until the first success).
    pub fn countries(&self) -> &[ViewCountry] {
        &self.countries
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Number of background requests whose result has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Record new options and stamp a new generation. Supersedes every earlier ticket.
    pub fn begin(&mut self, options: ViewOptions) -> Ticket {
        self.generation += 1;
        self.options = options.clone();
        Ticket {
            generation: self.generation,
            options,
        }
    }

    /// Hand a finished request back to the session.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<Vec<ViewCountry>, FetchError>,
    ) -> Completion {
        if ticket.generation < self.generation {
            log::warn!(
                "discarding stale result for request #{} (current #{})",
                ticket.generation,
                self.generation
            );
            return Completion::Stale;
        }
        match result {
            Ok(list) => {
                let n = list.len();
                self.countries = list;
                Completion::Applied(n)
            }
            Err(e) => Completion::Failed(e),
        }
    }

    /// Start a background request for `options`.
    pub fn request(&mut self, source: Arc<dyn DataSource>, options: ViewOptions) -> Ticket {
        let ticket = self.begin(options);
        let sender = self.sender.clone();
        let locale = self.locale.clone();
        let job = ticket.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            // a panicking source must still report back, or `wait` never returns
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                pipeline::build_view(source.as_ref(), &job.options, &locale)
            }))
            .unwrap_or_else(|payload| {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "data source panicked".to_string());
                log::error!("request #{} panicked: {}", job.generation, msg);
                Err(FetchError::Aborted(msg))
            });
            let _ = sender.send((job, result));
        });

        ticket
    }

    /// Collect every request that has finished so far, without blocking.
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            self.in_flight -= 1;
            out.push(self.complete(&ticket, result));
        }
        out
    }

    /// Block until the newest request finishes; older ones are applied (or dropped) on the way.
    ///
    /// Returns `None` when nothing is in flight.
    pub fn wait(&mut self) -> Option<Completion> {
        while self.in_flight > 0 {
            let (ticket, result) = self.receiver.recv().ok()?;
            self.in_flight -= 1;
            let completion = self.complete(&ticket, result);
            if ticket.generation == self.generation {
                return Some(completion);
            }
        }
        None
    }
}
