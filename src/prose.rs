//! Markdown-to-prose stripping for assistant replies.
//!
//! The chat views render plain paragraphs, so model output is flattened:
//! emphasis markers, list bullets, headers, inline code, and link syntax
//! are removed while keeping the visible text.

use regex::Regex;

/// Strip markdown decoration from `text`, returning plain prose.
pub fn markdown_to_prose(text: &str) -> String {
    // Bold before italic so ** pairs are not eaten as two * pairs.
    let bold = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let italic = Regex::new(r"\*([^*]+)\*").unwrap();
    let bullets = Regex::new(r"(?m)^[\s]*[-*]\s+").unwrap();
    let numbered = Regex::new(r"(?m)^[\s]*\d+\.\s+").unwrap();
    let headers = Regex::new(r"#{1,6}\s+").unwrap();
    let code = Regex::new(r"`([^`]+)`").unwrap();
    let links = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
    let blank_runs = Regex::new(r"\n{3,}").unwrap();

    let text = bold.replace_all(text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = bullets.replace_all(&text, "");
    let text = numbered.replace_all(&text, "");
    let text = headers.replace_all(&text, "");
    let text = code.replace_all(&text, "$1");
    let text = links.replace_all(&text, "$1");
    let text = blank_runs.replace_all(&text, "\n\n");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis() {
        assert_eq!(markdown_to_prose("**bold** and *italic*"), "bold and italic");
    }

    #[test]
    fn strips_list_markers() {
        let input = "- first\n* second\n  - indented\n1. third\n2. fourth";
        assert_eq!(
            markdown_to_prose(input),
            "first\nsecond\nindented\nthird\nfourth"
        );
    }

    #[test]
    fn strips_headers_code_and_links() {
        let input = "## Summary\nSee `severity` in [the chart](https://example.com/chart).";
        assert_eq!(
            markdown_to_prose(input),
            "Summary\nSee severity in the chart."
        );
    }

    #[test]
    fn collapses_blank_runs_and_trims() {
        let input = "\n\nfirst\n\n\n\nsecond\n\n";
        assert_eq!(markdown_to_prose(input), "first\n\nsecond");
    }

    #[test]
    fn plain_prose_passes_through() {
        let input = "Pain has averaged 6/10 over the past week.";
        assert_eq!(markdown_to_prose(input), input);
    }
}
