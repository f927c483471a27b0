//! Prompt templates for research reports

use crate::research::entities::{PageExtract, SearchResult};

/// Templates for the research report pipeline
pub struct ResearchPromptTemplate;

impl ResearchPromptTemplate {
    /// System instruction for the report writer.
    pub fn writer_system() -> &'static str {
        "You are a precise research writer. Produce a clean, accurate, and up-to-date report in Markdown. \
         Use clear headings, bullet lists, short paragraphs, and add a Sources section at the end. \
         Structure the report as: Overview, What it is, Why it matters, How it works (high-level flow), \
         Core concepts, Current ecosystem, Use cases, Limitations & open questions, and Sources. \
         Keep it factual and concise."
    }

    /// Evidence JSON handed to the writer: `{"results": [...], "pages": [...]}`.
    pub fn findings_json(results: &[SearchResult], pages: &[PageExtract]) -> String {
        serde_json::json!({
            "results": results,
            "pages": pages,
        })
        .to_string()
    }

    /// Report request for `topic` with the serialized evidence.
    pub fn summarize(topic: &str, findings_json: &str) -> String {
        format!(
            "You are a precise AI research assistant.\n\
             Summarize the latest information for the topic below.\n\n\
             Topic: {topic}\n\n\
             Evidence (JSON array of search results and page extracts):\n\
             {findings_json}\n\n\
             Instructions:\n\
             - Produce a concise, well-structured report.\n\
             - Use headings, bullet points, and short paragraphs.\n\
             - Include inline citations as [n] that map to the Sources list.\n\
             - End with a Sources section with title and URL for each source.\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::entities::FetchedPage;

    #[test]
    fn test_findings_json_shape() {
        let results = vec![SearchResult::new("t", "https://u", "s")];
        let pages = vec![PageExtract {
            rank: 1,
            url: "https://u".to_string(),
            page: FetchedPage {
                title: "T".to_string(),
                text: "body".to_string(),
                length: 4,
            },
        }];

        let json: serde_json::Value =
            serde_json::from_str(&ResearchPromptTemplate::findings_json(&results, &pages))
                .unwrap();
        assert_eq!(json["results"][0]["title"], "t");
        assert_eq!(json["pages"][0]["rank"], 1);
        // page fields are flattened next to rank/url
        assert_eq!(json["pages"][0]["text"], "body");
    }

    #[test]
    fn test_summarize_embeds_topic_and_evidence() {
        let prompt = ResearchPromptTemplate::summarize("MCP", "{\"results\":[]}");
        assert!(prompt.contains("Topic: MCP"));
        assert!(prompt.contains("{\"results\":[]}"));
        assert!(prompt.contains("Sources section"));
    }
}
