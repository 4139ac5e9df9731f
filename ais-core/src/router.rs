//! Sentence router: validate, filter and reassemble AIS sentences.
//!
//! Responsibilities:
//! - Reject lines that are empty, fail the checksum, or are not AIS
//! - Emit single-sentence messages immediately
//! - Stitch multi-sentence messages back together in order
//! - Report every rejected line out of band with the reason
//!
//! [`SentenceRouter`] is the synchronous state machine. [`run_router`] drives
//! one over tokio channels and signals end of input with a type 255 message.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::bits;
use crate::checksum;
use crate::sentence::Sentence;
use crate::types::{FailedSentence, Issue, Message};

/// AIS never spans a message over more than this many sentences.
pub const MAX_FRAGMENTS: usize = 5;

// ---------------------------------------------------------------------------
// Routing result
// ---------------------------------------------------------------------------

/// Outcome of feeding one line to the router.
///
/// A single line can complete a message and still flush older fragments
/// as failures, so both sides may be populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Routed {
    pub message: Option<Message>,
    pub failed: Vec<FailedSentence>,
}

impl Routed {
    fn fail(line: &str, issue: Issue) -> Self {
        Routed {
            message: None,
            failed: vec![FailedSentence::new(line, issue)],
        }
    }
}

// ---------------------------------------------------------------------------
// Reassembly state machine
// ---------------------------------------------------------------------------

/// Reassembles multi-sentence AIS messages.
///
/// Fragments must arrive in order, with the same sequence id and declared
/// total. Anything else discards the partial message and reports its
/// fragments as [`Issue::IncompleteSpan`].
#[derive(Debug, Default)]
pub struct SentenceRouter {
    /// Fragments accepted so far for the current message.
    count: usize,
    /// Declared total of the current message, as received.
    expected_total: String,
    sequence_id: String,
    payload: String,
    /// Raw lines of the accepted fragments, for failure reports.
    cache: Vec<String>,
}

impl SentenceRouter {
    pub fn new() -> Self {
        SentenceRouter::default()
    }

    /// Number of fragments waiting for the rest of their message.
    pub fn pending(&self) -> usize {
        self.count
    }

    /// Process one raw line.
    ///
    /// Trailing CR/LF are ignored for validation but kept in failure reports.
    pub fn process(&mut self, raw: &str) -> Routed {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Routed::fail(raw, Issue::EmptyLine);
        }
        if !checksum::validate(line) {
            trace!(line, "checksum failed");
            return Routed::fail(raw, Issue::ChecksumFailed);
        }

        let sentence = match Sentence::parse(line) {
            Ok(s) => s,
            Err(issue) => return Routed::fail(raw, issue),
        };

        if sentence.is_single() {
            return self.process_single(&sentence);
        }
        self.process_fragment(raw, &sentence)
    }

    fn process_single(&mut self, sentence: &Sentence<'_>) -> Routed {
        let message = Message {
            msg_type: bits::message_type(sentence.payload),
            payload: sentence.payload.to_string(),
            padding: sentence.padding,
        };

        let mut failed = Vec::new();
        if self.count > 1 {
            debug!(
                fragments = self.count,
                "single-sentence message abandoned partial sequence"
            );
            failed = self.flush();
        }

        Routed {
            message: Some(message),
            failed,
        }
    }

    fn process_fragment(&mut self, raw: &str, sentence: &Sentence<'_>) -> Routed {
        let Some(fragment) = sentence.fragment_number() else {
            return Routed::fail(raw, Issue::InvalidFragmentNumber);
        };

        let over_limit = sentence
            .total_fragments()
            .is_some_and(|total| total > MAX_FRAGMENTS);
        if fragment > MAX_FRAGMENTS || over_limit {
            debug!(fragment, total = sentence.total, "fragment beyond span limit");
            return Routed::fail(raw, Issue::IncompleteSpan);
        }

        let mut failed = Vec::new();
        let continues = fragment == self.count + 1
            && (self.count == 0
                || (sentence.sequence_id == self.sequence_id
                    && sentence.total == self.expected_total));
        if !continues {
            failed = self.flush();
            if fragment != 1 {
                failed.push(FailedSentence::new(raw, Issue::IncompleteSpan));
                return Routed {
                    message: None,
                    failed,
                };
            }
        }

        self.payload.push_str(sentence.payload);
        self.cache.push(raw.to_string());
        self.count += 1;

        let mut message = None;
        if fragment == 1 {
            self.expected_total = sentence.total.to_string();
            self.sequence_id = sentence.sequence_id.to_string();
        } else if self.expected_total == sentence.fragment && self.count == fragment {
            let payload = std::mem::take(&mut self.payload);
            message = Some(Message {
                msg_type: bits::message_type(&payload),
                payload,
                padding: sentence.padding,
            });
            self.reset();
        }

        Routed { message, failed }
    }

    /// Drop the partial message, returning its fragments as failures.
    fn flush(&mut self) -> Vec<FailedSentence> {
        let failed = self
            .cache
            .drain(..)
            .map(|line| FailedSentence::new(line, Issue::IncompleteSpan))
            .collect();
        self.reset();
        failed
    }

    fn reset(&mut self) {
        self.count = 0;
        self.payload.clear();
        self.cache.clear();
    }
}

// ---------------------------------------------------------------------------
// Channel worker
// ---------------------------------------------------------------------------

/// Route every line from `input` until it closes, then send the
/// end-of-stream sentinel on `out`.
///
/// Stops early if the `out` receiver is dropped. A dropped `failed`
/// receiver only disables failure reporting.
pub async fn run_router(
    mut input: mpsc::Receiver<String>,
    out: mpsc::Sender<Message>,
    failed: mpsc::Sender<FailedSentence>,
) {
    let mut router = SentenceRouter::new();
    let mut report_failures = true;

    while let Some(line) = input.recv().await {
        let routed = router.process(&line);

        if report_failures {
            for f in routed.failed {
                if failed.send(f).await.is_err() {
                    debug!("failure receiver dropped, no longer reporting");
                    report_failures = false;
                    break;
                }
            }
        }

        if let Some(message) = routed.message {
            if out.send(message).await.is_err() {
                debug!("message receiver dropped, router stopping");
                return;
            }
        }
    }

    debug!(pending = router.pending(), "input closed");
    let _ = out.send(Message::end_of_stream()).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
