//! CLI output formatting: highlighted JSON, table cells.

use colored::Colorize;

/// Prints a JSON value pretty-printed with syntax highlighting.
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json));
}

/// Colors a pretty-printed JSON document.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta,
/// punctuation white.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut chars = json.chars().peekable();
    let mut expecting_value = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::from('"');
                let mut escaped = false;
                for next in chars.by_ref() {
                    literal.push(next);
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == '"' {
                        break;
                    }
                }
                if expecting_value {
                    out.push_str(&literal.green().to_string());
                } else {
                    out.push_str(&literal.cyan().to_string());
                }
                expecting_value = false;
            }
            ':' => {
                out.push_str(&":".white().to_string());
                expecting_value = true;
            }
            ',' => {
                out.push_str(&",".white().to_string());
                expecting_value = false;
            }
            '{' | '}' | '[' | ']' => {
                out.push_str(&ch.to_string().white().bold().to_string());
                // Array elements are values without a preceding colon.
                expecting_value = ch == '[';
            }
            _ if ch.is_whitespace() => out.push(ch),
            _ => {
                let mut scalar = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if next == ',' || next == '}' || next == ']' || next.is_whitespace() {
                        break;
                    }
                    scalar.push(next);
                    chars.next();
                }
                let colored = match scalar.as_str() {
                    "true" | "false" | "null" => scalar.magenta(),
                    _ => scalar.yellow(),
                };
                out.push_str(&colored.to_string());
            }
        }
    }

    out
}

/// Truncates a string to a maximum number of characters, adding ellipsis if needed.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{kept}…")
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
