//! Line-based speech source adapter
//!
//! Stands in for a platform speech recognizer: each input line extends
//! the cumulative transcript and is emitted as a partial result;
//! end-of-input emits the final result. Used by the CLI to capture from
//! stdin and by tests to script recognition streams.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::application::ports::{RecognitionEvent, SpeechError, SpeechSource};

/// Speech source reading cumulative partials from a line-oriented reader.
///
/// Single-use: the reader is consumed by the first `start`.
pub struct LineSpeechSource<R> {
    reader: Mutex<Option<R>>,
}

impl<R> LineSpeechSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    /// Create a source over a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
        }
    }
}

#[async_trait]
impl<R> SpeechSource for LineSpeechSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn start(&self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeechError> {
        let reader = self
            .reader
            .lock()
            .await
            .take()
            .ok_or(SpeechError::DeviceUnavailable)?;

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            let mut lines = reader.lines();
            let mut accumulated = String::new();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if !accumulated.is_empty() {
                            accumulated.push(' ');
                        }
                        accumulated.push_str(line);
                        if tx
                            .send(RecognitionEvent::Partial(accumulated.clone()))
                            .await
                            .is_err()
                        {
                            // Session already torn down
                            return;
                        }
                    }
                    Ok(None) => {
                        debug!("line input ended, emitting final result");
                        let _ = tx.send(RecognitionEvent::Final(accumulated)).await;
                        return;
                    }
                    Err(e) => {
                        let _ = tx.send(RecognitionEvent::Error(e.to_string())).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn stop(&self) {
        // Nothing to detach: the reader task ends when its channel
        // closes or the input reaches end-of-file.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::BufReader;

    fn source_from(input: &str) -> LineSpeechSource<BufReader<Cursor<Vec<u8>>>> {
        LineSpeechSource::new(BufReader::new(Cursor::new(input.as_bytes().to_vec())))
    }

    async fn drain(mut rx: mpsc::Receiver<RecognitionEvent>) -> Vec<RecognitionEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn lines_accumulate_into_partials_then_final() {
        let source = source_from("milk\nand eggs\n");
        let events = drain(source.start().await.unwrap()).await;

        assert_eq!(
            events,
            vec![
                RecognitionEvent::Partial("milk".to_string()),
                RecognitionEvent::Partial("milk and eggs".to_string()),
                RecognitionEvent::Final("milk and eggs".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let source = source_from("milk\n\n   \neggs\n");
        let events = drain(source.start().await.unwrap()).await;

        assert_eq!(
            events,
            vec![
                RecognitionEvent::Partial("milk".to_string()),
                RecognitionEvent::Partial("milk eggs".to_string()),
                RecognitionEvent::Final("milk eggs".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_emits_empty_final() {
        let source = source_from("");
        let events = drain(source.start().await.unwrap()).await;

        assert_eq!(events, vec![RecognitionEvent::Final(String::new())]);
    }

    #[tokio::test]
    async fn second_start_fails() {
        let source = source_from("milk\n");
        let _rx = source.start().await.unwrap();

        assert!(matches!(
            source.start().await,
            Err(SpeechError::DeviceUnavailable)
        ));
    }

    #[tokio::test]
    async fn stop_is_safe_without_active_stream() {
        let source = source_from("milk\n");
        source.stop().await;
    }
}
