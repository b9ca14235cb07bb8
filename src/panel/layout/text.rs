use crate::panel::config::ELLIPSIS;

/// Greedy word wrap against a pixel budget. Words are never split unless a
/// single word is wider than the budget, in which case it is hard-broken.
/// Always returns at least one line.
pub fn wrap_text<F>(text: &str, width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if measure(&candidate) <= width {
                current = candidate;
                continue;
            }
            lines.push(core::mem::take(&mut current));
        }

        if measure(word) <= width {
            current.push_str(word);
            continue;
        }

        let mut pieces = hard_break(word, width, &measure);
        // The tail of a broken word may still take following words.
        if let Some(tail) = pieces.pop() {
            lines.extend(pieces);
            current = tail;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn hard_break<F>(word: &str, width: u32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut pieces = Vec::new();
    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if measure(&chunk) > width && chunk.chars().count() > 1 {
            chunk.pop();
            pieces.push(core::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        pieces.push(chunk);
    }
    pieces
}

/// Cuts `text` to at most `max_chars` characters and `width` pixels,
/// marking any cut with an ellipsis. Returns an empty string when not even
/// the ellipsis fits.
pub fn truncate_to_width<F>(text: &str, max_chars: Option<usize>, width: u32, measure: F) -> String
where
    F: Fn(&str) -> u32,
{
    let char_count = text.chars().count();
    let within_chars = max_chars.map_or(true, |max| char_count <= max);
    if within_chars && measure(text) <= width {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    let mut keep = match max_chars {
        Some(max) => char_count.min(max.saturating_sub(ellipsis_len)),
        None => char_count,
    };
    loop {
        let prefix: String = text.chars().take(keep).collect();
        let candidate = format!("{}{ELLIPSIS}", prefix.trim_end());
        if measure(&candidate) <= width {
            return candidate;
        }
        if keep == 0 {
            return String::new();
        }
        keep -= 1;
    }
}
