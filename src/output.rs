//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## lqip
//!
//! ```text
//! 001 works/atlas.png
//!     data:image/webp;base64,UklGRkIAAABXRUJQ… (92 bytes)
//! 002 works/missing.png
//!     fallback (transparent pixel)
//! ```
//!
//! ## render
//!
//! ```text
//! 001 Atlas (05/2023) [locked]
//! 002 Beacon (N/A)
//! ```

use crate::lqip::FALLBACK_PLACEHOLDER;
use crate::render::{WorksList, format_date};
use crate::selection::PointerSource;

/// Characters of a data URL shown before eliding.
const PREVIEW_LEN: usize = 48;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn preview(data_url: &str) -> String {
    match data_url.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}… ({} bytes)", &data_url[..cut], data_url.len()),
        None => format!("{} ({} bytes)", data_url, data_url.len()),
    }
}

/// One header line per asset with its placeholder underneath.
pub fn format_lqip_output(assets: &[String], data_urls: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (asset, url)) in assets.iter().zip(data_urls).enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), asset));
        if url == FALLBACK_PLACEHOLDER {
            lines.push(format!("{}fallback (transparent pixel)", indent(1)));
        } else {
            lines.push(format!("{}{}", indent(1), preview(url)));
        }
    }
    lines
}

pub fn print_lqip_output(assets: &[String], data_urls: &[String]) {
    for line in format_lqip_output(assets, data_urls) {
        println!("{}", line);
    }
}

/// One line per work, marking the displayed one.
pub fn format_works_output<P: PointerSource>(list: &WorksList<P>) -> Vec<String> {
    let selection = list.selection();
    list.works()
        .iter()
        .enumerate()
        .map(|(i, work)| {
            let date = work
                .date
                .as_deref()
                .and_then(format_date)
                .unwrap_or_else(|| "N/A".to_string());
            let marker = if !selection.is_item_active(work) {
                ""
            } else if selection.is_locked() {
                " [locked]"
            } else {
                " [hovered]"
            };
            format!("{} {} ({}){}", format_index(i + 1), work.title, date, marker)
        })
        .collect()
}

pub fn print_works_output<P: PointerSource>(list: &WorksList<P>) {
    for line in format_works_output(list) {
        println!("{}", line);
    }
}
