use once_cell::sync::Lazy;
use regex::Regex;

static TAB_CR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\t\r]+").expect("Invalid tab/cr regex"));

static ALNUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]").expect("Invalid alnum regex"));

// Ideographic space plus any Unicode punctuation run.
static PUNCT_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{3000}\p{P}]+").expect("Invalid punctuation regex"));

static WHITESPACE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

// Promotional boilerplate that never belongs in a search query.
const NOISE_PHRASES: &[&str] = &[
    "官方旗舰店",
    "正品保障",
    "扫码",
    "型号",
    "颜色",
    "规格",
    "优惠",
    "促销",
];

/// Line length (in chars) a good product query gravitates toward.
const TARGET_LEN: i64 = 24;

/// Distill recognized multi-line text into a short search query.
///
/// Picks the line whose length is closest to [`TARGET_LEN`] among lines of
/// 4 to 60 chars that contain at least one letter or digit, then strips
/// punctuation and known promotional phrases. Falls back to the first
/// usable line, and finally to the first 40 chars of the whole text.
pub fn extract_query(raw_text: &str) -> String {
    let raw = TAB_CR_REGEX.replace_all(raw_text, "\n");

    let lines: Vec<&str> = raw
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty() && ALNUM_REGEX.is_match(s))
        .collect();

    // Stable minimum: the first line at the best distance wins ties.
    let candidate = lines
        .iter()
        .filter(|s| {
            let len = s.chars().count();
            (4..=60).contains(&len)
        })
        .min_by_key(|s| (s.chars().count() as i64 - TARGET_LEN).abs())
        .or_else(|| lines.first())
        .copied()
        .unwrap_or("");

    let candidate = PUNCT_RUN_REGEX.replace_all(candidate, " ");
    let candidate = WHITESPACE_RUN_REGEX.replace_all(&candidate, " ");
    let mut candidate = candidate.trim().to_string();

    for phrase in NOISE_PHRASES {
        candidate = candidate.replace(phrase, "");
    }
    let candidate = candidate.trim().to_string();

    if candidate.is_empty() {
        raw.chars().take(40).collect::<String>().trim().to_string()
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picks_line_closest_to_target_length() {
        let text = "官方旗舰店\n苹果 14 Pro Max 256GB 深空黑色\n";
        assert_eq!(extract_query(text), "苹果 14 Pro Max 256GB 深空黑色");
    }

    #[test]
    fn first_line_wins_length_ties() {
        // both lines sit at the same distance from the target
        let text = "aaaaaaaaaaaaaaaaaaaaaa\naaaaaaaaaaaaaaaaaaaaaaaaaa";
        assert_eq!(extract_query(text), "aaaaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn tabs_and_carriage_returns_split_lines() {
        let text = "!!!\t小米手环 8 NFC版 智能运动\r???";
        assert_eq!(extract_query(text), "小米手环 8 NFC版 智能运动");
    }

    #[test]
    fn strips_punctuation_and_noise_phrases() {
        let text = "【促销】ThinkPad X1 Carbon, 2024款!";
        assert_eq!(extract_query(text), "ThinkPad X1 Carbon 2024款");
    }

    #[test]
    fn falls_back_to_first_surviving_line() {
        // no line fits the 4..=60 window, first alnum line is used
        assert_eq!(extract_query("ab\ncd\n"), "ab");
    }

    #[test]
    fn punctuation_only_input_falls_back_to_raw_prefix() {
        assert_eq!(extract_query("...\n---\n"), "...\n---");
        assert_eq!(extract_query(""), "");
    }
}
