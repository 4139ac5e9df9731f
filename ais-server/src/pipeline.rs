//! Line source → router → decoder pipeline.
//!
//! Shared by the `decode`/`summary` commands and the live TCP feed. The
//! router runs as its own task; this side drains both of its output channels
//! so that neither can fill up and stall it.

use std::io;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use ais_core::{run_router, AisError, AisMessage, FailedSentence, Message};

/// One result coming out of the pipeline.
#[derive(Debug)]
pub enum Event {
    Decoded(AisMessage),
    /// A complete message that could not be decoded (unsupported type or
    /// bad payload).
    Undecodable { message: Message, error: AisError },
    Failed(FailedSentence),
}

/// Running totals over a pipeline's events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub messages: u64,
    pub decoded: u64,
    pub failed: u64,
}

impl Counts {
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Decoded(_) => {
                self.messages += 1;
                self.decoded += 1;
            }
            Event::Undecodable { .. } => self.messages += 1,
            Event::Failed(_) => self.failed += 1,
        }
    }
}

/// Forward every line of `reader` to the router. Returns the line count.
///
/// Lines are split on raw bytes so that junk on the wire reaches the router
/// (and is rejected there) instead of ending the stream.
pub async fn pump_lines<R>(mut reader: R, tx: mpsc::Sender<String>) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut count = 0u64;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        count += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        if tx.send(line).await.is_err() {
            break;
        }
    }
    Ok(count)
}

fn decode_event(message: Message) -> Event {
    match ais_core::decode(&message) {
        Ok(decoded) => Event::Decoded(decoded),
        Err(error) => Event::Undecodable { message, error },
    }
}

/// Run `reader` through the router and decoders, calling `on_event` for
/// every result until the input is exhausted.
///
/// Returns the number of lines read. A read error is returned after
/// everything received before it has been processed.
pub async fn process<R, F>(reader: R, capacity: usize, mut on_event: F) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    F: FnMut(Event),
{
    let capacity = capacity.max(1);
    let (line_tx, line_rx) = mpsc::channel(capacity);
    let (msg_tx, mut msg_rx) = mpsc::channel(capacity);
    let (fail_tx, mut fail_rx) = mpsc::channel(capacity);

    let router = tokio::spawn(run_router(line_rx, msg_tx, fail_tx));
    let pump = tokio::spawn(pump_lines(reader, line_tx));

    loop {
        tokio::select! {
            Some(message) = msg_rx.recv() => {
                if message.is_end_of_stream() {
                    break;
                }
                on_event(decode_event(message));
            }
            Some(failed) = fail_rx.recv() => on_event(Event::Failed(failed)),
            else => break,
        }
    }

    // Failures routed before the sentinel may still be queued
    while let Some(failed) = fail_rx.recv().await {
        on_event(Event::Failed(failed));
    }

    if let Err(e) = router.await {
        warn!(error = %e, "router task failed");
    }
    let lines = match pump.await {
        Ok(result) => result?,
        Err(e) => return Err(io::Error::other(e)),
    };
    debug!(lines, "pipeline drained");
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ais_core::Issue;
    use std::io::Cursor;

    const INPUT: &str = "\
!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6F
!AIVDM,2,1,5,A,533iFNT00003W;3G;384iT<T400000000000001?88?73v0ik0RC1H11H30H,0*44
!AIVDM,2,2,5,A,51CU0E2CkP0,2*0C

!GPVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*70
!AIVDM,1,1,,A,E>jHC=c6:W2h22R`@1:WdP00000,0*49
";

    async fn collect(input: &str, capacity: usize) -> (Vec<Event>, u64) {
        let reader = Cursor::new(input.as_bytes().to_vec());
        let mut events = Vec::new();
        let lines = process(reader, capacity, |e| events.push(e)).await.unwrap();
        (events, lines)
    }

    #[tokio::test]
    async fn test_process_events() {
        let (events, lines) = collect(INPUT, 16).await;
        assert_eq!(lines, 6);

        let mut counts = Counts::default();
        for e in &events {
            counts.record(e);
        }
        assert_eq!(
            counts,
            Counts {
                messages: 3,
                decoded: 2,
                failed: 2,
            }
        );

        let decoded: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::Decoded(m) => Some(m.msg_type() as u32),
                _ => None,
            })
            .collect();
        assert_eq!(decoded, vec![3, 5]);

        let issues: Vec<Issue> = events
            .iter()
            .filter_map(|e| match e {
                Event::Failed(f) => Some(f.issue),
                _ => None,
            })
            .collect();
        assert_eq!(issues, vec![Issue::EmptyLine, Issue::NotAis]);

        let undecodable: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                Event::Undecodable { message, .. } => Some(message.msg_type),
                _ => None,
            })
            .collect();
        assert_eq!(undecodable, vec![21]);
    }

    #[tokio::test]
    async fn test_process_survives_invalid_utf8() {
        let mut input = b"\xff\xfe garbage\r\n".to_vec();
        input.extend_from_slice(b"!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6F\n");

        let mut events = Vec::new();
        let lines = process(Cursor::new(input), 16, |e| events.push(e))
            .await
            .unwrap();
        assert_eq!(lines, 2);
        assert_eq!(events.len(), 2);
        // Failures and messages travel on separate channels
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Failed(f) if f.issue == Issue::ChecksumFailed)));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Decoded(m) if m.mmsi() == 601041200)));
    }

    #[tokio::test]
    async fn test_process_tiny_channels() {
        // Capacity 1 forces the router to block on both outputs
        let (events, _) = collect(INPUT, 1).await;
        assert_eq!(events.len(), 5);
    }

    #[tokio::test]
    async fn test_process_empty_input() {
        let (events, lines) = collect("", 4).await;
        assert!(events.is_empty());
        assert_eq!(lines, 0);
    }

    #[tokio::test]
    async fn test_pump_lines_counts() {
        let (tx, mut rx) = mpsc::channel(8);
        let n = pump_lines(Cursor::new(b"a\nb\r\nc\xff".to_vec()), tx).await.unwrap();
        assert_eq!(n, 3);
        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.as_deref(), Some("b"));
        assert_eq!(rx.recv().await.as_deref(), Some("c\u{FFFD}"));
        assert!(rx.recv().await.is_none());
    }
}
