//! Line-oriented [`RequestSource`] over any [`BufRead`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"Remove":{"id":"5f1c0b2e-8d0a-4c43-9d4e-0d6f8a1d2b7c"}}
//! {"Rename":{"id":"5f1c0b2e-8d0a-4c43-9d4e-0d6f8a1d2b7c","name":"Mail"}}
//! {"Grid":{"count":5}}
//! {"Next":{"current":4,"count":5,"direction":1}}
//! ```

use crate::command::{BadRequest, Incoming, Request};
use crate::traits::RequestSource;
use log::{debug, error, info};
use std::io::BufRead;
use std::sync::mpsc;

/// A [`RequestSource`] reading newline-delimited JSON requests.
///
/// Blank lines are ignored.  Lines that do not parse are logged and
/// forwarded as [`BadRequest`] so every request line gets an answer.  The
/// source ends at end of input.
pub struct LineSource<R> {
    reader: R,
}

/// Errors produced by the line source.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl<R: BufRead + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send> RequestSource for LineSource<R> {
    type Error = StreamError;

    fn run(&mut self, sink: mpsc::Sender<Incoming>) -> Result<(), Self::Error> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let incoming = match serde_json::from_str::<Request>(text) {
                Ok(req) => {
                    debug!("received {:?}", req);
                    Ok(req)
                }
                Err(e) => {
                    error!("bad request: {} ({})", text, e);
                    Err(BadRequest(e.to_string()))
                }
            };
            if sink.send(incoming).is_err() {
                info!("sink closed, shutting down");
                return Ok(());
            }
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str) -> Vec<Incoming> {
        let mut source = LineSource::new(Cursor::new(input.to_string()));
        let (tx, rx) = mpsc::channel();
        source.run(tx).unwrap();
        rx.try_iter().collect()
    }

    #[test]
    fn forwards_each_line() {
        let reqs = collect(
            "{\"Remove\":{\"id\":\"a\"}}\n{\"Grid\":{\"count\":4}}\n{\"ValidName\":{\"name\":\"x\"}}",
        );
        assert_eq!(reqs.len(), 3);
        assert!(matches!(&reqs[0], Ok(Request::Remove { id: Some(id) }) if id == "a"));
        assert!(matches!(reqs[1], Ok(Request::Grid { .. })));
        assert!(matches!(reqs[2], Ok(Request::ValidName { .. })));
    }

    #[test]
    fn skips_blank_lines_and_reports_malformed_ones() {
        let reqs = collect("\n   \nnot json at all\n{\"Unknown\":{}}\n{\"Grid\":{\"count\":2}}\n");
        assert_eq!(reqs.len(), 3);
        assert!(reqs[0].is_err());
        assert!(reqs[1].is_err());
        assert!(matches!(reqs[2], Ok(Request::Grid { .. })));
    }

    #[test]
    fn malformed_drop_target_items_are_forwarded() {
        let reqs = collect(
            "{\"DropTarget\":{\"x\":0,\"y\":0,\"items\":[{\"x\":0,\"y\":0}]}}\n{\"DropTarget\":{\"x\":0,\"y\":0,\"items\":\"nope\"}}\n",
        );
        assert_eq!(reqs.len(), 2);
        assert!(matches!(&reqs[0], Ok(Request::DropTarget { items: Some(items), .. }) if items.len() == 1 && items[0].is_none()));
        assert!(matches!(reqs[1], Ok(Request::DropTarget { items: None, .. })));
    }

    #[test]
    fn stops_when_sink_is_closed() {
        let mut source = LineSource::new(Cursor::new("{\"Grid\":{\"count\":2}}\n".repeat(3)));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        assert!(source.run(tx).is_ok());
    }
}
