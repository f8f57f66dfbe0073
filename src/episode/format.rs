// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{NaiveDate, NaiveDateTime};

/// Render a duration in seconds as zero-padded `HH:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Render a publication timestamp as e.g. `Jan 22, 21`
pub fn format_published(published_at: &NaiveDateTime) -> String {
    published_at.format("%b %-d, %y").to_string()
}

/// Render the header date as e.g. `Friday, January 22`
pub fn format_header_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Shorten a title to at most `max_len` characters, ending with `...`
pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }

    let kept: String = title.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Turn an HTML description into plain terminal text
///
/// Tags are dropped, block-level boundaries become line breaks, entities are
/// decoded and blank lines are removed. A `<` only opens a tag when followed by
/// a letter, `/` or `!`; any other `<` is kept as text.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' && chars.peek().is_some_and(|&next| opens_tag(next)) {
            let tag: String = chars.by_ref().take_while(|&c| c != '>').collect();
            if breaks_line(&tag) {
                text.push('\n');
            }
        } else {
            text.push(c);
        }
    }

    let decoded = html_escape::decode_html_entities(&text);

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || next == '/' || next == '!'
}

/// Whether a tag (contents between `<` and `>`) ends a line of text
fn breaks_line(tag: &str) -> bool {
    let is_closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match name.as_str() {
        "br" => true,
        "p" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => is_closing,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Duration tests ===

    #[test]
    fn duration_pads_all_components() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(61), "00:01:01");
    }

    #[test]
    fn duration_includes_hours() {
        assert_eq!(format_duration(3981), "01:06:21");
        assert_eq!(format_duration(36000), "10:00:00");
    }

    #[test]
    fn duration_does_not_wrap_past_a_day() {
        assert_eq!(format_duration(90061), "25:01:01");
    }

    // === Date tests ===

    #[test]
    fn published_uses_short_month_and_year() {
        let dt = NaiveDate::from_ymd_opt(2021, 1, 8)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        assert_eq!(format_published(&dt), "Jan 8, 21");
    }

    #[test]
    fn header_date_spells_out_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 22).unwrap();
        assert_eq!(format_header_date(date), "Friday, January 22");
    }

    // === Title tests ===

    #[test]
    fn truncate_keeps_short_titles() {
        assert_eq!(truncate_title("Short", 10), "Short");
    }

    #[test]
    fn truncate_shortens_long_titles() {
        assert_eq!(truncate_title("A rather long title", 11), "A rather...");
    }

    #[test]
    fn truncate_respects_multibyte_chars() {
        assert_eq!(truncate_title("Programação funcional", 12), "Programaç...");
    }

    // === HTML tests ===

    #[test]
    fn strip_html_removes_tags_and_breaks_paragraphs() {
        let html = "<p>Hello <strong>world</strong></p><p>Second<br/>line</p>";
        assert_eq!(strip_html(html), "Hello world\nSecond\nline");
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(strip_html("<p>Tom &amp; Jerry &lt;3</p>"), "Tom & Jerry <3");
    }

    #[test]
    fn strip_html_keeps_literal_angle_brackets() {
        assert_eq!(strip_html("<p>5 < 6 and 7 > 3</p>"), "5 < 6 and 7 > 3");
        assert_eq!(strip_html("a <= b<br>c"), "a <= b\nc");
    }

    #[test]
    fn strip_html_drops_comments() {
        assert_eq!(strip_html("<!-- note --><p>Body</p>"), "Body");
    }

    #[test]
    fn strip_html_handles_plain_text() {
        assert_eq!(strip_html("  just text  "), "just text");
    }

    #[test]
    fn strip_html_drops_links_but_keeps_text() {
        let html = r#"<p>See <a href="https://example.com">the site</a>.</p>"#;
        assert_eq!(strip_html(html), "See the site.");
    }
}
