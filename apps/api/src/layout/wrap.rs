//! Greedy line breaking against the static font metrics.
//!
//! `wrap_text` breaks a single-style paragraph into lines (multi-line cells).
//! `flow_runs` lays out several differently styled runs as one flowing line
//! that wraps back to the left margin (inline "Label: value" text).

use crate::layout::font_metrics::{get_metrics, FontStyle, PT_PER_MM};

/// Breaks `text` into lines no wider than `max_width_mm`.
///
/// Explicit `\n` always starts a new line. Words wider than a whole line are
/// split between characters. Empty input yields a single empty line.
pub fn wrap_text(text: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let metrics = get_metrics(style);
    let space_w = metrics.space_width * size_pt / PT_PER_MM;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.width_mm(word, size_pt);

            if !current.is_empty() && current_width + space_w + word_w <= max_width_mm {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if word_w <= max_width_mm {
                current.push_str(word);
                current_width = word_w;
            } else {
                let mut chunks = split_word(word, style, size_pt, max_width_mm);
                // The tail stays open so following words can join it.
                current = chunks.pop().unwrap_or_default();
                current_width = metrics.width_mm(&current, size_pt);
                lines.extend(chunks);
            }
        }

        lines.push(current);
    }

    lines
}

/// Splits a single overlong word into pieces that each fit the width.
/// Every piece holds at least one character.
fn split_word(word: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let metrics = get_metrics(style);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_w = metrics.width_mm(c.encode_utf8(&mut buf), size_pt);
        if !current.is_empty() && current_width + char_w > max_width_mm {
            pieces.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(c);
        current_width += char_w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Flowing runs
// ────────────────────────────────────────────────────────────────────────────

/// One styled piece of input for [`flow_runs`].
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    pub style: FontStyle,
    pub text: &'a str,
}

/// A fragment of one run placed on an output line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Index of the source run in the input slice.
    pub run: usize,
    pub text: String,
    /// Horizontal offset from the start of the line.
    pub offset_mm: f32,
}

/// Lays out `runs` as continuous text, wrapping at `max_width_mm`.
///
/// Breaks happen at spaces; a run boundary is not a break opportunity by
/// itself, so `"Label: "` followed by `"value"` stays on one line if it fits.
pub fn flow_runs(runs: &[Run<'_>], size_pt: f32, max_width_mm: f32) -> Vec<Vec<Span>> {
    let mut lines: Vec<Vec<Span>> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_width = 0.0_f32;

    for (run_index, run) in runs.iter().enumerate() {
        let metrics = get_metrics(run.style);

        for (i, segment) in run.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            for piece in segment.split_inclusive(' ') {
                let visible_w = metrics.width_mm(piece.trim_end(), size_pt);
                if current_width > 0.0 && current_width + visible_w > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                    if piece.trim().is_empty() {
                        continue;
                    }
                }

                if visible_w <= max_width_mm {
                    push_fragment(&mut current, run_index, piece, current_width);
                    current_width += metrics.width_mm(piece, size_pt);
                    continue;
                }

                // Wider than a whole line: break between characters.
                for c in piece.chars() {
                    let mut buf = [0u8; 4];
                    let ch = c.encode_utf8(&mut buf);
                    let char_w = metrics.width_mm(ch, size_pt);
                    if c != ' ' && current_width > 0.0 && current_width + char_w > max_width_mm {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    push_fragment(&mut current, run_index, ch, current_width);
                    current_width += char_w;
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Appends `text` to the line, extending the last span when it comes from the same run.
fn push_fragment(line: &mut Vec<Span>, run: usize, text: &str, offset_mm: f32) {
    match line.last_mut() {
        Some(span) if span.run == run => span.text.push_str(text),
        _ => line.push(Span {
            run,
            text: text.to_string(),
            offset_mm,
        }),
    }
}
