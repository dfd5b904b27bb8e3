//! Splitting extracted text into translation-sized segments.
//!
//! The remote provider bounds how much text one request may carry, so
//! extracted text is cut into ordered segments along paragraph
//! boundaries, falling back to sentence boundaries for paragraphs that
//! are too large on their own.

/// Paragraph separator recognized in extracted text and used when
/// rejoining translated segments.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

const SENTENCE_SEPARATOR: &str = ". ";

/// Default segment bound, sized to the provider's per-request limit.
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 5000;

/// Split `text` into ordered segments of at most `max_size` characters.
///
/// Paragraphs are accumulated greedily into a buffer that is flushed
/// whenever the next paragraph would overflow it. A paragraph that
/// alone exceeds `max_size` is re-split at sentence granularity with
/// the same accumulate/flush logic; a single sentence still exceeding
/// `max_size` is emitted verbatim rather than split mid-sentence, so
/// callers must tolerate the occasional oversized segment.
///
/// Segments come out trimmed, non-empty, and in source order.
/// Concatenating them reconstructs the input up to boundary
/// whitespace. Empty input yields no segments.
pub fn segment(text: &str, max_size: usize) -> Vec<String> {
    assert!(max_size > 0, "max_size must be positive");

    let mut segments = Vec::new();
    let mut buffer = String::new();

    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        if paragraph.trim().is_empty() {
            continue;
        }

        // The joining separator counts against the budget too, so the
        // bound holds exactly for flushed buffers.
        let separator = if buffer.is_empty() {
            0
        } else {
            PARAGRAPH_SEPARATOR.len()
        };

        if char_len(&buffer) + separator + char_len(paragraph) > max_size {
            flush(&mut buffer, &mut segments);
            if char_len(paragraph) > max_size {
                accumulate_sentences(paragraph, max_size, &mut buffer, &mut segments);
                continue;
            }
        }

        if !buffer.is_empty() {
            buffer.push_str(PARAGRAPH_SEPARATOR);
        }
        buffer.push_str(paragraph);
    }

    flush(&mut buffer, &mut segments);
    segments
}

/// Sentence-level fallback for a paragraph exceeding `max_size`.
///
/// `split_inclusive` keeps the ". " terminator on each sentence, so
/// concatenating the emitted segments loses nothing but boundary
/// whitespace. Whatever remains in `buffer` afterwards keeps
/// accumulating with the paragraphs that follow.
fn accumulate_sentences(
    paragraph: &str,
    max_size: usize,
    buffer: &mut String,
    segments: &mut Vec<String>,
) {
    for sentence in paragraph.split_inclusive(SENTENCE_SEPARATOR) {
        if char_len(buffer) + char_len(sentence) > max_size {
            flush(buffer, segments);
            if char_len(sentence) > max_size {
                // No splitting below sentence granularity.
                segments.push(sentence.trim().to_string());
                continue;
            }
        }
        buffer.push_str(sentence);
    }
}

fn flush(buffer: &mut String, segments: &mut Vec<String>) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
    buffer.clear();
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
