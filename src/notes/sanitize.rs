//! Render-boundary handling of untrusted note content.
//!
//! Note bodies, note types and patient names come from the endpoint and are
//! treated as untrusted markup. Everything that reaches the terminal goes
//! through [`display_text`] or [`inline_text`]: tags are dropped, entities
//! are decoded, and control characters (ESC included) are removed so a note
//! cannot drive the terminal.

const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "tr", "table", "ul", "ol", "pre", "blockquote", "hr", "h1", "h2",
    "h3", "h4", "h5", "h6",
];

/// Convert a note body into plain multi-line text.
///
/// `text/plain` bodies keep their characters; anything else is parsed as
/// markup.
pub fn display_text(body: &str, content_type: Option<&str>) -> String {
    let is_plain = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/plain"))
        .unwrap_or(false);
    let text = if is_plain {
        body.replace("\r\n", "\n")
    } else {
        strip_markup(body)
    };
    collapse_blank_lines(&strip_controls(&text))
}

/// Convert a short label into a single line of plain text.
pub fn inline_text(label: &str) -> String {
    strip_controls(&strip_markup(label))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for re-emission inside HTML.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..open]));
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            // Unterminated tag: keep the text as written.
            out.push_str(&decode_entities(&rest[open..]));
            return out;
        };
        let tag = &after_open[..close];
        rest = &after_open[close + 1..];

        let name = tag_name(tag);
        let closing = tag.trim_start().starts_with('/');
        if !closing && (name == "script" || name == "style") {
            let end_marker = format!("</{name}");
            rest = match rest.to_ascii_lowercase().find(&end_marker) {
                Some(end) => &rest[end..],
                None => "",
            };
            continue;
        }
        if BLOCK_TAGS.contains(&name.as_str()) {
            out.push('\n');
        }
    }

    out.push_str(&decode_entities(rest));
    out
}

fn tag_name(tag: &str) -> String {
    tag.trim_start()
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let decoded = candidate
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| decode_entity(&candidate[..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|&ch| ch == '\n' || ch == '\t' || !ch.is_control())
        .collect()
}

fn collapse_blank_lines(text: &str) -> String {
    let mut lines = Vec::new();
    let mut previous_blank = true;
    for line in text.lines() {
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(if blank { "" } else { line });
        previous_blank = blank;
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_breaks_blocks() {
        let body = "<div><b>Assessment</b><br>Stable.</div><p>Plan: follow up</p>";
        assert_eq!(display_text(body, None), "Assessment\nStable.\n\nPlan: follow up");
    }

    #[test]
    fn drops_script_and_style_content() {
        let body = "<style>p{color:red}</style>Hello<SCRIPT>alert('x')</SCRIPT> world";
        assert_eq!(display_text(body, Some("text/html")), "Hello world");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(
            display_text("a &lt;b&gt; &amp; &quot;c&quot; &#65;&#x42; &bogus; & d", None),
            "a <b> & \"c\" AB &bogus; & d"
        );
    }

    #[test]
    fn removes_terminal_escapes() {
        let body = "safe\u{1b}[2Jtext &#27;[31mred";
        let shown = display_text(body, None);
        assert!(!shown.contains('\u{1b}'));
        assert_eq!(shown, "safe[2Jtext [31mred");
    }

    #[test]
    fn plain_text_keeps_angle_brackets() {
        let body = "BP <120/80>\r\nHR 70";
        assert_eq!(display_text(body, Some("text/plain; charset=utf-8")), "BP <120/80>\nHR 70");
    }

    #[test]
    fn unterminated_tag_is_kept_as_text() {
        assert_eq!(display_text("value < 5 and rising", None), "value < 5 and rising");
    }

    #[test]
    fn inline_text_is_single_line() {
        assert_eq!(inline_text("<span>Progress\n Note</span>"), "Progress Note");
        assert_eq!(inline_text("Jane\u{7}  Doe"), "Jane Doe");
    }

    #[test]
    fn escape_markup_escapes_specials() {
        assert_eq!(
            escape_markup(r#"<img src="x" onerror='y'> & co"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; co"
        );
    }
}
