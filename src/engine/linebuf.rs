/// Reassembles newline-delimited lines from arbitrarily chunked bytes.
///
/// Chunk boundaries do not align with line boundaries: one line may span
/// several chunks, one chunk may carry several lines. Lines are only
/// emitted once their terminating `\n` has arrived; `finish` flushes a
/// trailing unterminated line at end of stream.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Appends a chunk and returns every line completed by it, in order,
    /// without the trailing newline.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop(); // the newline itself
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// The unterminated remainder, if any.
    pub fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [&str; 3] = [
        r#"{"response":"Hello"}"#,
        r#"{"response":" there"}"#,
        r#"{"response":"!","done":true}"#,
    ];

    fn joined() -> Vec<u8> {
        let mut body = LINES.join("\n").into_bytes();
        body.push(b'\n');
        body
    }

    fn collect(chunks: &[&[u8]]) -> Vec<String> {
        let mut buf = LineBuffer::default();
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(buf.push(chunk));
        }
        out.extend(buf.finish());
        out
    }

    #[test]
    fn one_chunk_many_lines() {
        assert_eq!(collect(&[&joined()]), LINES);
    }

    #[test]
    fn line_split_across_many_chunks() {
        let body = joined();
        // Split the first line across three chunks, mid-JSON.
        let chunks: Vec<&[u8]> = vec![&body[..4], &body[4..9], &body[9..]];
        assert_eq!(collect(&chunks), LINES);
    }

    #[test]
    fn byte_by_byte_equals_single_chunk() {
        let body = joined();
        let chunks: Vec<&[u8]> = body.chunks(1).collect();
        assert_eq!(collect(&chunks), LINES);
    }

    #[test]
    fn every_split_point_yields_the_same_lines() {
        let body = joined();
        for split in 0..body.len() {
            let chunks: Vec<&[u8]> = vec![&body[..split], &body[split..]];
            assert_eq!(collect(&chunks), LINES, "split at byte {split}");
        }
    }

    #[test]
    fn unterminated_tail_is_flushed_by_finish() {
        let mut buf = LineBuffer::default();
        assert_eq!(buf.push(b"first\nsecond"), vec!["first".to_string()]);
        assert_eq!(buf.finish(), Some("second".to_string()));
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let mut buf = LineBuffer::default();
        assert_eq!(buf.push(b"a\r\nb\n"), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(buf.finish(), None);
    }
}
