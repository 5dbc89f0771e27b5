//! Message splitting for the platform's single-message length limit.

/// Telegram's maximum length of a single message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// Text at or under the limit comes back as a single untouched chunk.
/// Longer text is packed greedily line by line; a chunk is closed (with its
/// trailing whitespace trimmed) when the next line would overflow it. A
/// single line longer than the limit is hard-split at character boundaries
/// into limit-sized pieces rather than emitted oversized.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let limit = max_chars.max(1);
    if char_len(text) <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for line in text.split('\n') {
        let line_chars = char_len(line);

        if line_chars + 1 > limit {
            close_chunk(&mut chunks, &mut current);
            current_chars = 0;
            chunks.extend(hard_split(line, limit));
            continue;
        }

        if current_chars + line_chars + 1 <= limit {
            current.push_str(line);
            current.push('\n');
            current_chars += line_chars + 1;
        } else {
            close_chunk(&mut chunks, &mut current);
            current.push_str(line);
            current.push('\n');
            current_chars = line_chars + 1;
        }
    }

    close_chunk(&mut chunks, &mut current);
    chunks
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn close_chunk(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim_end();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

fn hard_split(line: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut count = 0usize;
    for ch in line.chars() {
        if count == limit {
            pieces.push(std::mem::take(&mut piece));
            count = 0;
        }
        piece.push(ch);
        count += 1;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
