// Incremental decoder for text/event-stream bodies
use bytes::BytesMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// Buffers partial lines across chunks and yields complete events.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw = self.buffer.split_to(newline + 1);
            let text = String::from_utf8_lossy(&raw);
            let line = text.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(event) = self.take_event() {
                    events.push(event);
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            match field {
                "event" => self.event = Some(value.to_string()),
                "data" => self.data.push(value.to_string()),
                _ => {}
            }
        }

        events
    }

    fn take_event(&mut self) -> Option<SseEvent> {
        if self.event.is_none() && self.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event: self.event.take().unwrap_or_else(|| "message".to_string()),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"event: put\ndata: {\"path\":").is_empty());

        let events = decoder.push(b"\"/\",\"data\":null}\n\nevent: keep-alive\r\ndata: null\r\n\r\n");
        assert_eq!(
            events,
            vec![
                SseEvent {
                    event: "put".to_string(),
                    data: r#"{"path":"/","data":null}"#.to_string(),
                },
                SseEvent {
                    event: "keep-alive".to_string(),
                    data: "null".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_comments_and_multiline_data() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b": ping\n\ndata: a\ndata: b\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                event: "message".to_string(),
                data: "a\nb".to_string(),
            }]
        );
    }
}
