//! Minimal server-sent-events reader for streamed completions.
//!
//! Only `data:` fields matter here. Lines may be split across network chunks,
//! so bytes are buffered until a newline arrives. `data: [DONE]` ends the
//! stream.

use std::pin::Pin;

use anyhow::{Error, Result};
use futures::{Stream, StreamExt};

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Data(String),
    Done,
    Ignored,
}

struct LineReader<S> {
    inner: Pin<Box<S>>,
    buf: Vec<u8>,
    finished: bool,
}

/// Yields the payload of each `data:` line in `inner`.
pub fn data_lines<S, B, E>(inner: S) -> impl Stream<Item = Result<String>> + Send + 'static
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<Error> + Send + 'static,
{
    let reader = LineReader {
        inner: Box::pin(inner),
        buf: Vec::new(),
        finished: false,
    };

    futures::stream::unfold(reader, |mut reader| async move {
        loop {
            if let Some(pos) = reader.buf.iter().position(|&b| b == b'\n') {
                let line = reader.buf.drain(..=pos).collect::<Vec<u8>>();
                match classify(&line) {
                    SseLine::Data(data) => return Some((Ok(data), reader)),
                    SseLine::Done => return None,
                    SseLine::Ignored => continue,
                }
            }

            if reader.finished {
                // Flush a trailing line that had no newline.
                let rest = std::mem::take(&mut reader.buf);
                return match classify(&rest) {
                    SseLine::Data(data) => Some((Ok(data), reader)),
                    SseLine::Done | SseLine::Ignored => None,
                };
            }

            match reader.inner.next().await {
                Some(Ok(chunk)) => reader.buf.extend_from_slice(chunk.as_ref()),
                Some(Err(err)) => {
                    reader.finished = true;
                    reader.buf.clear();
                    return Some((Err(err.into()), reader));
                }
                None => reader.finished = true,
            }
        }
    })
}

fn classify(line: &[u8]) -> SseLine {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Ignored;
    };
    let data = data.strip_prefix(' ').unwrap_or(data);

    if data.trim() == DONE_MARKER {
        SseLine::Done
    } else if data.trim().is_empty() {
        SseLine::Ignored
    } else {
        SseLine::Data(data.to_string())
    }
}
