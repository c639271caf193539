//! Pure codepoint-array helpers behind the built-in string methods (§4.3
//! "string methods"). Kept free of `Value`/`Proxy` so they can be unit
//! tested directly against `Vec<char>`.

/// Normalises a possibly-negative index against `len`, clamping into
/// `[0, len]`. Mirrors the slice/pad end-to-end scenarios in §8: negative
/// indices count from the end, as `-2` means `len - 2`.
fn normalize(index: i64, len: usize) -> usize {
    let len = len as i64;
    let idx = if index < 0 { len + index } else { index };
    idx.clamp(0, len) as usize
}

/// `"beggar".slice(1, -2) == "egg"`, `"spoon".slice(-2) == "on"` (§8 #3).
pub fn slice(chars: &[char], start: i64, end: Option<i64>) -> Vec<char> {
    let len = chars.len();
    let start = normalize(start, len);
    let end = end.map(|e| normalize(e, len)).unwrap_or(len);
    if start >= end {
        return Vec::new();
    }
    chars[start..end].to_vec()
}

/// Finds non-overlapping occurrences of `needle` in `haystack`, scanning
/// left to right.
fn find_matches(haystack: &[char], needle: &[char]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            matches.push(i);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    matches
}

/// Which occurrences a `limit` selects out of the matches found, in order
/// (§8 #4): `None` is every match; a non-negative limit takes the first
/// `n`; a negative limit takes the last `|n|`.
fn select(total: usize, limit: Option<i64>) -> (usize, usize) {
    match limit {
        None => (0, total),
        Some(n) if n >= 0 => (0, (n as usize).min(total)),
        Some(n) => {
            let take = (-n) as usize;
            let take = take.min(total);
            (total - take, total)
        }
    }
}

/// `"banana".replace("a", "o", 2) == "bonona"`; `replace("a", "o", -2) ==
/// "banono"`; `replace("a", "o", 0) == "banana"` (§8 #4).
///
/// An empty `needle` is special-cased as "insert `replacement` between
/// every pair of adjacent characters" — there is no empty-string match to
/// scan for, so the `limit`/`negative-limit` convention above applies to
/// the inter-character gaps instead.
pub fn replace(haystack: &[char], needle: &[char], replacement: &[char], limit: Option<i64>) -> Vec<char> {
    if needle.is_empty() {
        return replace_empty_needle(haystack, replacement, limit);
    }

    let matches = find_matches(haystack, needle);
    let (lo, hi) = select(matches.len(), limit);
    let selected = &matches[lo..hi];

    let mut out = Vec::with_capacity(haystack.len());
    let mut cursor = 0;
    for &pos in selected {
        out.extend_from_slice(&haystack[cursor..pos]);
        out.extend_from_slice(replacement);
        cursor = pos + needle.len();
    }
    out.extend_from_slice(&haystack[cursor..]);
    out
}

fn replace_empty_needle(haystack: &[char], replacement: &[char], limit: Option<i64>) -> Vec<char> {
    if haystack.len() < 2 {
        return haystack.to_vec();
    }
    let gaps = haystack.len() - 1;
    let (lo, hi) = select(gaps, limit);

    let mut out = Vec::with_capacity(haystack.len());
    out.push(haystack[0]);
    for gap in 0..gaps {
        if gap >= lo && gap < hi {
            out.extend_from_slice(replacement);
        }
        out.push(haystack[gap + 1]);
    }
    out
}

/// Repeats `pad` cyclically, truncated to exactly `count` characters —
/// `"egg".padEnd(8, "[]")` needs 5 characters of `"[]"` repeated, giving
/// `"[][][ "` truncated to `"[][][`" (§8 #5).
fn cycled_pad(pad: &[char], count: usize) -> Vec<char> {
    if pad.is_empty() || count == 0 {
        return Vec::new();
    }
    pad.iter().copied().cycle().take(count).collect()
}

/// `"egg".padStart(8) == "     egg"` (default pad is a single space).
pub fn pad_start(chars: &[char], width: usize, pad: &[char]) -> Vec<char> {
    if chars.len() >= width {
        return chars.to_vec();
    }
    let mut out = cycled_pad(pad, width - chars.len());
    out.extend_from_slice(chars);
    out
}

/// `"egg".padEnd(8, "[]") == "egg[][][`"` (§8 #5).
pub fn pad_end(chars: &[char], width: usize, pad: &[char]) -> Vec<char> {
    if chars.len() >= width {
        return chars.to_vec();
    }
    let mut out = chars.to_vec();
    out.extend(cycled_pad(pad, width - chars.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn slice_handles_negative_start_and_end() {
        assert_eq!(slice(&cs("beggar"), 1, Some(-2)), cs("egg"));
        assert_eq!(slice(&cs("spoon"), -2, None), cs("on"));
    }

    #[test]
    fn replace_limits_select_first_or_last_matches() {
        assert_eq!(replace(&cs("banana"), &cs("a"), &cs("o"), Some(2)), cs("bonona"));
        assert_eq!(replace(&cs("banana"), &cs("a"), &cs("o"), Some(-2)), cs("banono"));
        assert_eq!(replace(&cs("banana"), &cs("a"), &cs("o"), Some(0)), cs("banana"));
    }

    #[test]
    fn replace_with_empty_needle_joins_characters() {
        assert_eq!(replace(&cs("banana"), &cs(""), &cs("-"), None), cs("b-a-n-a-n-a"));
    }

    #[test]
    fn pad_start_default_space() {
        assert_eq!(pad_start(&cs("egg"), 8, &cs(" ")), cs("     egg"));
    }

    #[test]
    fn pad_end_truncates_cycled_pad() {
        assert_eq!(pad_end(&cs("egg"), 8, &cs("[]")), cs("egg[][]["));
    }

    #[test]
    fn padding_is_a_no_op_when_already_long_enough() {
        assert_eq!(pad_start(&cs("hello"), 3, &cs(" ")), cs("hello"));
    }
}
