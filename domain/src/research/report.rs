//! Locally assembled research brief.
//!
//! Used when the text-generation capability cannot write the report. The
//! brief is built only from search results and page previews, so a research
//! run still produces something useful without a model.

use crate::research::entities::{PageExtract, SearchResult};
use crate::util::{squash_whitespace, truncate_chars};

/// Characters of page text shown per preview.
const PAGE_PREVIEW_CHARS: usize = 500;

/// Render a Markdown brief from raw findings.
///
/// Only the first `max_results` search results are listed.
pub fn build_local_report(
    topic: &str,
    results: &[SearchResult],
    pages: &[PageExtract],
    max_results: usize,
) -> String {
    let listed = &results[..results.len().min(max_results)];
    let mut lines = vec![
        format!("# Research Brief: {}", topic),
        String::new(),
        "## Overview".to_string(),
        format!(
            "This brief summarizes public information related to '{}'. It aggregates top search \
             results and quick page extracts as a snapshot.",
            topic
        ),
        String::new(),
        "## Key Findings (titles)".to_string(),
    ];

    for result in listed {
        let label = [&result.title, &result.snippet, &result.url]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty());
        if let Some(label) = label {
            lines.push(format!("- {} ({})", label, result.url));
        }
    }

    lines.push(String::new());
    lines.push("## Extracted Page Previews".to_string());
    for extract in pages {
        let title = if extract.page.title.trim().is_empty() {
            "(no title)"
        } else {
            extract.page.title.trim()
        };
        let preview = squash_whitespace(truncate_chars(extract.page.text.trim(), PAGE_PREVIEW_CHARS));
        lines.push(format!("- {} ({})\n\n  {}...", title, extract.url, preview));
    }

    lines.push(String::new());
    lines.push("## Sources".to_string());
    for result in listed {
        if !result.url.is_empty() {
            lines.push(format!("- {}", result.url));
        }
    }

    lines.push(String::new());
    lines.push(
        "_Note: model summarization was unavailable (e.g., quota). This is a locally \
         constructed summary from search results and page previews._"
            .to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::entities::FetchedPage;

    fn extract(rank: usize, url: &str, title: &str, text: &str) -> PageExtract {
        PageExtract {
            rank,
            url: url.to_string(),
            page: FetchedPage {
                title: title.to_string(),
                text: text.to_string(),
                length: text.len(),
            },
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let results = vec![
            SearchResult::new("MCP intro", "https://a.example", "intro"),
            SearchResult::new("", "https://b.example", "only a snippet"),
        ];
        let pages = vec![extract(1, "https://a.example", "Intro page", "Body text")];

        let report = build_local_report("MCP", &results, &pages, 10);

        assert!(report.starts_with("# Research Brief: MCP"));
        let overview = report.find("## Overview").unwrap();
        let findings = report.find("## Key Findings").unwrap();
        let previews = report.find("## Extracted Page Previews").unwrap();
        let sources = report.find("## Sources").unwrap();
        assert!(overview < findings && findings < previews && previews < sources);

        assert!(report.contains("- MCP intro (https://a.example)"));
        assert!(report.contains("- only a snippet (https://b.example)"));
        assert!(report.contains("- Intro page (https://a.example)"));
        assert!(report.contains("Body text..."));
        assert!(report.contains("summarization was unavailable"));
    }

    #[test]
    fn test_report_respects_max_results() {
        let results = vec![
            SearchResult::new("one", "https://1.example", ""),
            SearchResult::new("two", "https://2.example", ""),
        ];
        let report = build_local_report("t", &results, &[], 1);
        assert!(report.contains("https://1.example"));
        assert!(!report.contains("https://2.example"));
    }

    #[test]
    fn test_untitled_page_preview() {
        let long_text = "x".repeat(800);
        let pages = vec![extract(2, "https://p.example", "", &long_text)];
        let report = build_local_report("t", &[], &pages, 5);
        assert!(report.contains("- (no title) (https://p.example)"));
        assert!(report.contains(&format!("{}...", "x".repeat(500))));
        assert!(!report.contains(&"x".repeat(501)));
    }
}
