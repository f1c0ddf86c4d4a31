/*!
format.rs

Styling primitives for human output paths (JSON paths never use these).

  - StyleOptions::detect() honors NO_COLOR / NO_EMOJI / COLUMNS
  - color(role, text, &style)
  - emoji(tag, &style)
  - box_header(title, subtitle_opt, &style)
  - kv_block(pairs, &style) aligned key/value lines

Zero non-std dependencies on purpose; degrades to plain text when ANSI is
disabled.
*/

use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "plan" => "📋",
        "run" => "🚀",
        "destroy" => "💥",
        _ => "",
    }
}

/// Single-line boxed header with an optional dimmed subtitle line below the
/// title. Long content is clipped to the terminal width rather than wrapped;
/// these headers carry short status strings, not payload.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let max_inner = style.term_width.saturating_sub(4).max(16);
    let title_line = clip(title.as_ref(), max_inner);
    let sub_line = subtitle.map(|s| clip(s.as_ref(), max_inner));

    let inner = display_width(&title_line).max(sub_line.as_deref().map_or(0, display_width));

    let mut out = String::new();
    out.push('┌');
    out.push_str(&"─".repeat(inner + 2));
    out.push_str("┐\n");
    push_row(&mut out, &color(Role::Primary, &title_line, style), &title_line, inner);
    if let Some(sub) = &sub_line {
        push_row(&mut out, &color(Role::Secondary, sub, style), sub, inner);
    }
    out.push('└');
    out.push_str(&"─".repeat(inner + 2));
    out.push('┘');
    out
}

fn push_row(out: &mut String, styled: &str, raw: &str, inner: usize) {
    let pad = inner - display_width(raw);
    out.push_str("│ ");
    out.push_str(styled);
    out.push_str(&" ".repeat(pad));
    out.push_str(" │\n");
}

/// Aligned `key : value` lines for invocation details.
pub fn kv_block(pairs: &[(&str, String)], style: &StyleOptions) -> String {
    let key_width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        let padded = format!("{k:<key_width$}");
        lines.push(format!("  {} : {v}", color(Role::Accent, padded, style)));
    }
    lines.join("\n")
}

fn clip(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if display_width(&out) + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            i += 2;
            while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i < bytes.len() {
                i += 1;
            }
            continue;
        }
        buf.push(bytes[i] as char);
        i += 1;
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> StyleOptions {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 80,
        }
    }

    #[test]
    fn box_header_contains_title_and_subtitle() {
        let b = box_header("tofu plan", Some("exit=0 • 12ms"), &plain());
        assert!(b.contains("tofu plan"));
        assert!(b.contains("exit=0"));
        assert!(b.starts_with('┌'));
        assert!(b.ends_with('┘'));
    }

    #[test]
    fn kv_block_aligns_keys() {
        let block = kv_block(
            &[("action", "plan".into()), ("dir", "terraform".into())],
            &plain(),
        );
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 2);
        let sep = lines[0].find(" : ").unwrap();
        assert_eq!(lines[1].find(" : ").unwrap(), sep);
    }

    #[test]
    fn clip_adds_ellipsis() {
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abc", 4), "abc");
    }

    #[test]
    fn strip_ansi_removes_codes() {
        assert_eq!(strip_ansi("\x1b[31mRED\x1b[0m"), "RED");
    }

    #[test]
    fn color_disabled_passes_through() {
        assert_eq!(color(Role::Error, "x", &plain()), "x");
    }
}
