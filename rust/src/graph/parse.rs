//! Parsing of the text typed into the editor: ids, predecessor lists, durations.

/// Normalize a task id: surrounding whitespace removed, uppercased.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Split a comma-separated predecessor list into normalized ids.
///
/// Tokens are trimmed and uppercased; empty tokens are dropped. Duplicates and
/// order are preserved.
pub fn parse_predecessors(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(normalize_id)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse a duration typed by the user and clamp it to `floor`.
///
/// Reads an optional sign followed by leading digits, so `"4 days"` is 4 and
/// `"2.5"` is 2. Input with no leading integer counts as 0. The result is
/// never below `floor`.
pub fn parse_duration(raw: &str, floor: u32) -> u32 {
    let value = parse_leading_int(raw).unwrap_or(0);
    let clamped = value.clamp(i64::from(floor), i64::from(u32::MAX));
    u32::try_from(clamped).unwrap_or(u32::MAX)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate on overflow; the caller clamps anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
