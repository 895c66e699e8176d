//! Slot templates: strings with `$name` / `${name}` placeholders.
//!
//! The syntax is the familiar shell-like one: a slot name starts with an
//! ASCII letter or underscore and continues with ASCII letters, digits, or
//! underscores; `${name}` delimits the name explicitly; `$$` is a literal
//! dollar sign. A `$` that starts none of these is kept as text.
//!
//! Substitution is always "safe": slots without a value are rendered back
//! exactly as they were written.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Slot { name: String, braced: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    source: String,
    pieces: Vec<Piece>,
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl SlotTemplate {
    pub fn parse(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let len = chars.len();
        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut i = 0;

        let flush = |text: &mut String, pieces: &mut Vec<Piece>| {
            if !text.is_empty() {
                pieces.push(Piece::Text(std::mem::take(text)));
            }
        };

        while i < len {
            let ch = chars[i];
            if ch != '$' {
                text.push(ch);
                i += 1;
                continue;
            }

            // `$$`
            if i + 1 < len && chars[i + 1] == '$' {
                text.push('$');
                i += 2;
                continue;
            }

            // `$name`
            if i + 1 < len && is_name_start(chars[i + 1]) {
                let start = i + 1;
                let mut end = start + 1;
                while end < len && is_name_continue(chars[end]) {
                    end += 1;
                }
                flush(&mut text, &mut pieces);
                pieces.push(Piece::Slot {
                    name: chars[start..end].iter().collect(),
                    braced: false,
                });
                i = end;
                continue;
            }

            // `${name}`
            if i + 2 < len && chars[i + 1] == '{' && is_name_start(chars[i + 2]) {
                let start = i + 2;
                let mut end = start + 1;
                while end < len && is_name_continue(chars[end]) {
                    end += 1;
                }
                if end < len && chars[end] == '}' {
                    flush(&mut text, &mut pieces);
                    pieces.push(Piece::Slot {
                        name: chars[start..end].iter().collect(),
                        braced: true,
                    });
                    i = end + 1;
                    continue;
                }
            }

            text.push('$');
            i += 1;
        }
        flush(&mut text, &mut pieces);

        SlotTemplate {
            source: source.to_string(),
            pieces,
        }
    }

    /// The template as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Slot names in order of first appearance.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for piece in &self.pieces {
            if let Piece::Slot { name, .. } = piece {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Fill slots from `values`; slots with no value keep their placeholder.
    pub fn substitute(&self, values: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Slot { name, braced } => match values.get(name) {
                    Some(value) => out.push_str(value),
                    None if *braced => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for SlotTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
