//! Incremental Server-Sent Events decoding.

/// One decoded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// The joined `data:` lines of an event
    Data(String),
    /// The `[DONE]` sentinel that closes a completion stream
    Done,
}

/// Accumulates raw bytes and yields every complete event.
///
/// Bytes are buffered until a blank line terminates an event, so events
/// split across network reads and multi-byte characters split across reads
/// are both reassembled before decoding.
///
/// # Examples
///
/// ```
/// use depot_models::{SseDecoder, SseEvent};
///
/// let mut decoder = SseDecoder::default();
/// assert!(decoder.push(b"data: {\"a\"").is_empty());
/// let events = decoder.push(b":1}\n\ndata: [DONE]\n\n");
/// assert_eq!(
///     events,
///     vec![SseEvent::Data("{\"a\":1}".to_string()), SseEvent::Done]
/// );
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed bytes and drain every event they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend(bytes.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(pos) = find_boundary(&self.buffer) {
            let raw: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(event) = decode_event(&raw[..pos]) {
                events.push(event);
            }
        }
        events
    }

    /// Whether bytes of an unfinished event are still buffered.
    pub fn has_pending(&self) -> bool {
        self.buffer.iter().any(|b| !b.is_ascii_whitespace())
    }
}

fn find_boundary(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn decode_event(raw: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(raw);
    let data: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
        .collect();

    if data.is_empty() {
        // comments, keep-alives and events without data
        return None;
    }

    let data = data.join("\n");
    if data.trim() == "[DONE]" {
        Some(SseEvent::Done)
    } else {
        Some(SseEvent::Data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_every_event_in_one_read() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b"data: one\n\ndata: two\n\ndata: three\n\n");
        assert_eq!(
            events,
            vec![
                SseEvent::Data("one".into()),
                SseEvent::Data("two".into()),
                SseEvent::Data("three".into()),
            ]
        );
        assert!(!decoder.has_pending());
    }

    #[test]
    fn handles_crlf_and_comments() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b": keep-alive\r\n\r\nevent: message\r\ndata:x\r\n\r\n");
        assert_eq!(events, vec![SseEvent::Data("x".into())]);
    }

    #[test]
    fn joins_multi_line_data() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b"data: a\ndata: b\n\n");
        assert_eq!(events, vec![SseEvent::Data("a\nb".into())]);
    }

    #[test]
    fn reassembles_split_utf8() {
        let bytes = "data: caf\u{e9}\n\n".as_bytes();
        let split = bytes.len() - 3;
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(&bytes[..split]).is_empty());
        assert!(decoder.has_pending());
        assert_eq!(
            decoder.push(&bytes[split..]),
            vec![SseEvent::Data("caf\u{e9}".into())]
        );
    }
}
