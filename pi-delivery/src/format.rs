//! Incremental rendering of a digit stream.
//!
//! Digits arrive in chunks but are formatted one at a time: groups of ten
//! separated by a space, fifty digits per line, each line finalized with a
//! running-count annotation at a fixed column. The writer holds only the
//! current absolute index and whether the current line has been finalized,
//! so output is correct even when the stream ends mid-line.

use std::io;

use futures::{Stream, StreamExt};

use crate::error::{DeliveryError, RenderError};
use crate::types::DigitChunk;

/// Digits per space-separated group.
const GROUP_WIDTH: u64 = 10;

/// Digits per output line.
const LINE_WIDTH: u64 = 50;

/// Zero-based column where line annotations start.
const ANNOTATION_COLUMN: usize = 55;

/// Where formatted output goes.
///
/// The two operations are exactly what the formatter needs: emit text at the
/// cursor, and jump the cursor to an absolute zero-based column for the
/// annotation step and for mid-line resumes. Implementations decide how
/// (ANSI escapes, a capture buffer in tests).
pub trait RenderSink {
    /// Emit `text` at the current cursor position.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Move the cursor to the absolute zero-based `column` on the current line.
    fn move_to_column(&mut self, column: usize) -> io::Result<()>;
}

/// Streams digits into fixed-width grouped lines with running-count
/// annotations.
pub struct DigitWriter<'a, S> {
    sink: &'a mut S,
    /// Absolute position of the next digit to be written.
    current_index: u64,
    /// Whether the current output line already carries its annotation.
    line_finalized: bool,
}

impl<'a, S: RenderSink> DigitWriter<'a, S> {
    /// Create a writer whose first digit lands at absolute position
    /// `initial_index`.
    #[must_use]
    pub fn new(sink: &'a mut S, initial_index: u64) -> Self {
        Self {
            sink,
            current_index: initial_index,
            line_finalized: false,
        }
    }

    /// Drain `chunks` and write every digit as it arrives.
    ///
    /// Once the stream is exhausted the pending line is finalized, so every
    /// successful invocation ends with exactly one annotated line, complete
    /// or partial. If the stream fails mid-way the error is returned
    /// immediately: the already-rendered prefix stays on the sink, the
    /// partial line stays un-annotated, and nothing is rolled back.
    pub async fn render<St>(mut self, chunks: St) -> Result<(), RenderError>
    where
        St: Stream<Item = Result<DigitChunk, DeliveryError>>,
    {
        self.align_to_start()?;

        let mut chunks = std::pin::pin!(chunks);
        while let Some(item) = chunks.next().await {
            let chunk = item?;
            for digit in chunk.digits.chars() {
                self.write_digit(digit)?;
            }
        }

        self.finalize_line()?;
        Ok(())
    }

    /// Position the cursor under the first digit when resuming mid-line.
    ///
    /// Lines after the integer line hold positions `50k+1 ..= 50k+50`; the
    /// digit at position `p` occupies slot `(p - 1) % 50`, shifted right one
    /// column per completed group of ten.
    fn align_to_start(&mut self) -> io::Result<()> {
        if self.current_index == 0 {
            return Ok(());
        }
        let slot = (self.current_index - 1) % LINE_WIDTH;
        let column = (slot + slot / GROUP_WIDTH) as usize;
        if column > 0 {
            self.sink.move_to_column(column)?;
        }
        Ok(())
    }

    /// Write one digit and whatever separators or annotations it triggers.
    fn write_digit(&mut self, digit: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.sink.write_text(digit.encode_utf8(&mut buf))?;
        self.line_finalized = false;

        // The leading "3" is rendered as "3." on its own line.
        if self.current_index == 0 {
            self.sink.write_text(".\n")?;
            self.current_index = 1;
            return Ok(());
        }

        if self.current_index % GROUP_WIDTH == 0 {
            self.sink.write_text(" ")?;
        }
        if self.current_index % LINE_WIDTH == 0 {
            self.finalize_line()?;
        }

        self.current_index += 1;
        Ok(())
    }

    /// Annotate the current line with the running count and end it.
    fn finalize_line(&mut self) -> io::Result<()> {
        if self.line_finalized {
            return Ok(());
        }
        self.sink.move_to_column(ANNOTATION_COLUMN)?;
        self.sink
            .write_text(&format!("- {}\n", group_thousands(self.current_index)))?;
        self.line_finalized = true;
        Ok(())
    }
}

/// Format `n` in decimal with `,` thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::error::FetchCause;

    /// Captures sink operations for assertion.
    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Text(String),
        MoveTo(usize),
    }

    #[derive(Default)]
    struct RecordingSink {
        ops: Vec<Op>,
    }

    impl RecordingSink {
        /// Flatten captured text, rendering a column move as `<n>` markers.
        fn transcript(&self) -> String {
            let mut out = String::new();
            for op in &self.ops {
                match op {
                    Op::Text(t) => out.push_str(t),
                    Op::MoveTo(col) => out.push_str(&format!("<{col}>")),
                }
            }
            out
        }
    }

    impl RenderSink for RecordingSink {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.ops.push(Op::Text(text.to_string()));
            Ok(())
        }

        fn move_to_column(&mut self, column: usize) -> io::Result<()> {
            self.ops.push(Op::MoveTo(column));
            Ok(())
        }
    }

    fn chunk(start_index: u64, digits: &str) -> Result<DigitChunk, DeliveryError> {
        Ok(DigitChunk {
            start_index,
            digits: digits.to_string(),
        })
    }

    async fn render_chunks(
        initial_index: u64,
        chunks: Vec<Result<DigitChunk, DeliveryError>>,
    ) -> (RecordingSink, Result<(), RenderError>) {
        let mut sink = RecordingSink::default();
        let result = DigitWriter::new(&mut sink, initial_index)
            .render(stream::iter(chunks))
            .await;
        (sink, result)
    }

    #[tokio::test]
    async fn leading_three_gets_its_own_line() {
        let (sink, result) = render_chunks(0, vec![chunk(0, "3")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "3.\n<55>- 1\n");
    }

    #[tokio::test]
    async fn groups_of_ten_are_space_separated() {
        let (sink, result) = render_chunks(1, vec![chunk(1, "141592653589")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "1415926535 89<55>- 13\n");
    }

    #[tokio::test]
    async fn empty_stream_still_annotates_once() {
        let (sink, result) = render_chunks(0, vec![]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "<55>- 0\n");
    }

    #[tokio::test]
    async fn fiftieth_digit_finalizes_the_line() {
        let digits: String = "12345678901234567890123456789012345678901234567890".into();
        let (sink, result) = render_chunks(1, vec![chunk(1, &digits)]).await;
        result.unwrap();

        // Five space-separated groups, then the annotation; the line is
        // already finalized when the stream ends, so no extra annotation.
        assert_eq!(
            sink.transcript(),
            "1234567890 1234567890 1234567890 1234567890 1234567890 <55>- 50\n"
        );
    }

    #[tokio::test]
    async fn annotation_count_matches_crossed_line_boundaries() {
        // 120 digits starting at position 1 cross the boundaries at 50 and
        // 100 and end mid-line at 121.
        let digits = "9".repeat(120);
        let (sink, result) = render_chunks(1, vec![chunk(1, &digits)]).await;
        result.unwrap();

        let annotations = sink
            .ops
            .iter()
            .filter(|op| matches!(op, Op::MoveTo(col) if *col == 55))
            .count();
        assert_eq!(annotations, 3);
        assert!(sink.transcript().ends_with("<55>- 121\n"));
    }

    #[tokio::test]
    async fn digits_flow_across_chunk_boundaries() {
        let (sink, result) =
            render_chunks(1, vec![chunk(1, "14159"), chunk(6, "2653589")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "1415926535 89<55>- 13\n");
    }

    #[tokio::test]
    async fn resume_mid_group_aligns_under_the_next_digit() {
        // Position 13 occupies slot 12, shifted one column for the completed
        // first group.
        let (sink, result) = render_chunks(13, vec![chunk(13, "79")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "<13>79<55>- 15\n");
    }

    #[tokio::test]
    async fn resume_at_line_start_needs_no_alignment() {
        let (sink, result) = render_chunks(51, vec![chunk(51, "5")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "5<55>- 52\n");
    }

    #[tokio::test]
    async fn resume_on_a_line_boundary_aligns_to_the_last_slot() {
        let (sink, result) = render_chunks(50, vec![chunk(50, "0")]).await;
        result.unwrap();
        assert_eq!(sink.transcript(), "<53>0 <55>- 50\n");
    }

    #[tokio::test]
    async fn large_counts_are_thousands_grouped() {
        let digits = "8".repeat(50);
        let (sink, result) = render_chunks(951, vec![chunk(951, &digits)]).await;
        result.unwrap();
        assert!(sink.transcript().ends_with("<55>- 1,000\n"));
    }

    #[tokio::test]
    async fn stream_failure_propagates_without_annotating() {
        let items = vec![
            chunk(1, "14159"),
            Err(DeliveryError::Fetch {
                start: 6,
                count: 5,
                cause: FetchCause::OutOfRange,
            }),
        ];
        let (sink, result) = render_chunks(1, items).await;

        assert!(matches!(result, Err(RenderError::Delivery(_))));
        assert_eq!(sink.transcript(), "14159", "prefix stays, no annotation");
    }

    #[tokio::test]
    async fn rendering_is_idempotent_for_a_fixed_stream() {
        let (first, _) = render_chunks(1, vec![chunk(1, "1415926535")]).await;
        let (second, _) = render_chunks(1, vec![chunk(1, "1415926535")]).await;
        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(13), "13");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
