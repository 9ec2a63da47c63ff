//! Markup sanitization.
//!
//! `sanitize` strips markup-significant sequences while preserving plain
//! text. It runs its single pass to a fixpoint, which makes idempotence
//! (`sanitize(sanitize(x)) == sanitize(x)`) hold by construction even for
//! adversarial nesting like `<scr<script>ipt>`.

use aho_corasick::AhoCorasick;
use std::sync::OnceLock;

/// Container elements whose *content* is dangerous, not just the tags.
const CONTAINER_ELEMENTS: &[&str] = &["script", "style"];

/// Substrings that mark markup or script injection. Matched
/// case-insensitively; used both as the sanitizer fast path and by the
/// reject-markup validators.
const MARKUP_MARKERS: &[&str] = &[
    "<script",
    "</script",
    "<style",
    "</style",
    "<iframe",
    "<object",
    "<embed",
    "<svg",
    "javascript:",
    "vbscript:",
    "data:text/html",
    "onerror",
    "onload",
    "onclick",
    "onmouseover",
    "onfocus",
    "onsubmit",
];

fn markers() -> &'static AhoCorasick {
    static MARKERS: OnceLock<AhoCorasick> = OnceLock::new();
    MARKERS.get_or_init(|| {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(MARKUP_MARKERS)
            .expect("static marker patterns are valid")
    })
}

/// True if the text contains markup delimiters, injection markers, or
/// control characters. Validators that must reject markup outright (email,
/// phone) use this instead of sanitizing.
pub fn contains_markup(text: &str) -> bool {
    text.contains('<')
        || text.contains('>')
        || text.chars().any(is_forbidden_control)
        || markers().is_match(text)
}

/// Strip markup-significant sequences, preserving plain text content.
///
/// Removes script/style blocks including their content, every remaining
/// tag, `javascript:`-style scheme tokens, and on-event handler
/// attributes. Idempotent.
pub fn sanitize(text: &str) -> String {
    let mut current = text.to_string();
    // Each pass can only shrink the string, so this terminates.
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(text: &str) -> String {
    let without_controls: String = text
        .chars()
        .filter(|c| !is_forbidden_control(*c))
        .collect();

    let mut out = strip_container_blocks(&without_controls);
    out = strip_tags(&out);
    out = strip_scheme_tokens(&out);
    strip_event_handlers(&out)
}

fn is_forbidden_control(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\r' && c != '\t') || c == '\u{0}'
}

/// Remove `<script>...</script>` and `<style>...</style>` blocks, content
/// included. An unclosed block is stripped to the end of the input.
fn strip_container_blocks(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    'outer: while pos < text.len() {
        for element in CONTAINER_ELEMENTS {
            let open = format!("<{element}");
            if lower[pos..].starts_with(&open) {
                let close = format!("</{element}");
                match lower[pos..].find(&close) {
                    Some(rel) => {
                        let after = pos + rel + close.len();
                        // Skip past the closing tag's '>'.
                        pos = match text[after..].find('>') {
                            Some(gt) => after + gt + 1,
                            None => text.len(),
                        };
                    }
                    None => pos = text.len(),
                }
                continue 'outer;
            }
        }
        let c = text[pos..].chars().next().expect("pos is a char boundary");
        out.push(c);
        pos += c.len_utf8();
    }

    out
}

/// Remove tag-shaped runs: `<` followed by `/`, `!`, or a letter, through
/// the closing `>`. A dangling fragment is stripped to the end. A bare `<`
/// (as in "a < b") is plain text and survives.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '<' {
            let looks_like_tag = text[i + 1..]
                .chars()
                .next()
                .is_some_and(|n| n.is_ascii_alphabetic() || n == '/' || n == '!');
            if looks_like_tag {
                match text[i..].find('>') {
                    Some(rel) => {
                        let end = i + rel;
                        while let Some(&(j, _)) = chars.peek() {
                            if j > end {
                                break;
                            }
                            chars.next();
                        }
                    }
                    None => return out,
                }
                continue;
            }
        }
        out.push(c);
    }

    out
}

fn strip_scheme_tokens(text: &str) -> String {
    remove_all_case_insensitive(text, &["javascript:", "vbscript:", "data:text/html"])
}

/// Remove `onXXX=` handler attributes wherever they appear — even
/// mid-word, so split payloads cannot reassemble around the stripper.
fn strip_event_handlers(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        if lower[pos..].starts_with("on") {
            let rest = &lower[pos + 2..];
            let name_len = rest.chars().take_while(|c| c.is_ascii_alphabetic()).count();
            if name_len > 0 {
                let mut after = pos + 2 + name_len;
                while let Some(ws) = lower[after..].chars().next().filter(|c| c.is_whitespace()) {
                    after += ws.len_utf8();
                }
                if lower[after..].starts_with('=') {
                    pos = after + 1;
                    continue;
                }
            }
        }
        let c = text[pos..].chars().next().expect("pos is a char boundary");
        out.push(c);
        pos += c.len_utf8();
    }

    out
}

fn remove_all_case_insensitive(text: &str, needles: &[&str]) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    'outer: while pos < text.len() {
        for needle in needles {
            if lower[pos..].starts_with(needle) {
                pos += needle.len();
                continue 'outer;
            }
        }
        let c = text[pos..].chars().next().expect("pos is a char boundary");
        out.push(c);
        pos += c.len_utf8();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks_with_content() {
        assert_eq!(sanitize("hello <script>alert(1)</script>world"), "hello world");
    }

    #[test]
    fn strips_unclosed_script_block() {
        assert_eq!(sanitize("safe<script>alert(1)"), "safe");
    }

    #[test]
    fn strips_tags_but_keeps_text() {
        assert_eq!(sanitize("<b>bold</b> and <i>italic</i>"), "bold and italic");
    }

    #[test]
    fn keeps_bare_angle_comparisons() {
        assert_eq!(sanitize("cost < 100 and rate > 2"), "cost < 100 and rate > 2");
    }

    #[test]
    fn strips_javascript_scheme() {
        assert_eq!(sanitize("click javascript:alert(1) here"), "click alert(1) here");
    }

    #[test]
    fn strips_nested_scheme_reassembly() {
        // Removing the inner token must not leave a fresh one behind.
        let out = sanitize("javajavascript:script:alert(1)");
        assert!(!out.to_ascii_lowercase().contains("javascript:"));
    }

    #[test]
    fn strips_event_handlers() {
        let out = sanitize("<img src=x onerror=alert(1)>trailing onload = pwn()");
        assert!(!out.to_ascii_lowercase().contains("onerror"));
        assert!(!out.to_ascii_lowercase().contains("onload"));
        assert!(out.contains("trailing"));
    }

    #[test]
    fn keeps_words_starting_with_on() {
        assert_eq!(sanitize("only once online"), "only once online");
    }

    #[test]
    fn idempotent_on_adversarial_nesting() {
        let cases = [
            "<scr<script>ipt>alert(1)</scr</script>ipt>",
            "<<script>script>alert(1)<</script>/script>",
            "javascrjavascript:ipt:alert(1)",
        ];
        for case in cases {
            let once = sanitize(case);
            assert_eq!(sanitize(&once), once, "not idempotent for {case:?}");
            assert!(!once.to_ascii_lowercase().contains("<script"));
            assert!(!once.to_ascii_lowercase().contains("javascript:"));
        }
    }

    #[test]
    fn detects_markup() {
        assert!(contains_markup("<script>"));
        assert!(contains_markup("JAVASCRIPT:void(0)"));
        assert!(contains_markup("has\u{0}nul"));
        assert!(!contains_markup("plain text, even with () and ="));
    }
}
