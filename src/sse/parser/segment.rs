//! Single-segment decoding
//!
//! A segment is the text between two blank-line delimiters. It decodes
//! into one `SseMessage` when it starts with an `event:` line followed by
//! a `data:` block, or directly with a `data:` block.

use super::completion::CompletionPredicate;
use crate::sse::events::{SegmentRejection, SseMessage, DATA_PREFIX, EVENT_PREFIX};

/// Whether a segment is empty or only whitespace.
pub fn is_blank(segment: &str) -> bool {
    segment.trim().is_empty()
}

/// Decode one delimited segment into a message.
///
/// Values are taken verbatim after the prefix, so `event: x` yields the
/// event `" x"`. Everything after the leading `data:` belongs to the
/// payload, including later lines. Leading line breaks are skipped: a run
/// of more than two newlines between messages is still one delimiter, no
/// matter how the chunks fell.
pub fn decode_segment(
    segment: &str,
    completion: Option<&CompletionPredicate>,
) -> Result<SseMessage, SegmentRejection> {
    let segment = segment.trim_start_matches('\n');
    let (first_line, rest) = match segment.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (segment, None),
    };

    let message = if let Some(event) = first_line.strip_prefix(EVENT_PREFIX) {
        let data = rest
            .and_then(|block| block.strip_prefix(DATA_PREFIX))
            .ok_or_else(|| SegmentRejection::MissingData {
                event: event.to_string(),
            })?;
        SseMessage::new(event, data)
    } else if let Some(data) = segment.strip_prefix(DATA_PREFIX) {
        // Some emitters skip the event line entirely
        SseMessage::data_only(data)
    } else {
        return Err(SegmentRejection::UnrecognizedFraming {
            first_line: first_line.to_string(),
        });
    };

    match completion {
        Some(predicate) if !predicate.is_complete(&message.data) => {
            Err(SegmentRejection::Incomplete {
                event: message.event,
            })
        }
        _ => Ok(message),
    }
}
