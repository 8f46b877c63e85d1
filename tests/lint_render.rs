//! Lint: every `[X]` option drawn by the adventure renderer must be tappable.
//!
//! Option lines go through `ClickableList::push_clickable()` so a tap acts as
//! pressing the key. A bracket-key literal passed to a plain `.push(` call
//! shows the option but leaves it dead on touch screens.
//!
//! This test scans `render.rs` files under `src/adventure/`.

use std::fs;
use std::path::Path;

/// Does the text contain a bracket key such as `[N]`, `[k]` or `[1]`?
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'[' && w[2] == b']' && w[1].is_ascii_alphanumeric())
}

/// Lines with a bracket key inside a non-clickable `.push(` call.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.starts_with("//") || !contains_bracket_key(line) {
                return None;
            }
            let plain_push = line.contains(".push(") && !line.contains("push_clickable(");
            plain_push.then(|| (i + 1, trimmed.to_string()))
        })
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((path.display().to_string(), line_num, line));
            }
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/adventure");
    let mut violations = Vec::new();
    visit_render_files(&dir, &mut violations);

    if !violations.is_empty() {
        let mut msg = String::from(
            "Found bracket-key text [X] in non-clickable push() calls.\n\
             Use push_clickable() so the option can be tapped.\n\n",
        );
        for (file, line_num, line) in &violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_file_exists() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/adventure/render.rs");
    assert!(path.is_file(), "lint target moved: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [N] North"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [N] North"), 'N');"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [I]nventory"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[I]"));
        assert!(contains_bracket_key("[s]earch"));
        assert!(contains_bracket_key("[1]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[IN]"));
        assert!(!contains_bracket_key("[{}]"));
    }
}
