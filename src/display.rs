//! Typed-text rendering for completions
//!
//! The completion text is split into whitespace-delimited tokens and
//! revealed cumulatively with a per-token pause that depends on token
//! length, with a trailing cursor glyph shown until the final token. This
//! is presentation only: the stored message always holds the full text.
//! Frame construction and pacing are pure functions so tests run without
//! a terminal or a clock.

use std::io::Write;
use std::time::Duration;

/// Cursor glyph shown while the answer is still being revealed.
pub const CURSOR: &str = "▌";

/// Tokens shorter than this are paced at the fast interval.
const SHORT_TOKEN_LEN: usize = 5;
/// Pause after a short token.
const SHORT_PAUSE: Duration = Duration::from_millis(30);
/// Pause after a long token.
const LONG_PAUSE: Duration = Duration::from_millis(50);

/// Pause to apply after revealing `token`.
///
/// Short tokens are paced faster than long ones. Length is measured in
/// characters, not bytes, so accented Spanish words pace correctly.
pub fn pause_for(token: &str) -> Duration {
    if token.chars().count() < SHORT_TOKEN_LEN {
        SHORT_PAUSE
    } else {
        LONG_PAUSE
    }
}

/// The cumulative reveal frames for `text`.
///
/// Every frame but the last carries the trailing cursor; the last frame is
/// the full text with surrounding whitespace trimmed.
///
/// # Examples
///
/// ```
/// use emprendobot::display::frames;
///
/// let f = frames("hola mundo");
/// assert_eq!(f, vec!["hola ▌", "hola mundo"]);
/// ```
pub fn frames(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(tokens.len());
    let mut acc = String::new();
    for (i, token) in tokens.iter().enumerate() {
        acc.push_str(token);
        acc.push(' ');
        if i < tokens.len() - 1 {
            result.push(format!("{}{}", acc, CURSOR));
        } else {
            result.push(acc.trim_end().to_string());
        }
    }
    result
}

/// Reveal `text` token by token on `out`.
///
/// Writes each token followed by the cursor glyph, pauses according to
/// [`pause_for`], then erases the cursor before the next token. With
/// `paced` false no sleeps happen, which keeps tests fast.
pub async fn type_out<W: Write>(text: &str, out: &mut W, paced: bool) -> std::io::Result<()> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        let last = i == tokens.len() - 1;
        if last {
            write!(out, "{}", token)?;
        } else {
            write!(out, "{} {}", token, CURSOR)?;
        }
        out.flush()?;
        if paced {
            tokio::time::sleep(pause_for(token)).await;
        }
        if !last {
            // Erase the cursor cell so the next token lands in its place.
            write!(out, "\u{8} \u{8}")?;
        }
    }
    writeln!(out)?;
    out.flush()
}
