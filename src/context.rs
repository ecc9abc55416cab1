// ============================================================================
// File: src/context.rs
// Context assembly and citation tracking
// ============================================================================

use std::fmt;

use crate::models::SearchDocument;

/// Fallback title for documents the index returns without one
const UNKNOWN_SOURCE: &str = "Unknown Source";

/// A numbered reference tying a piece of context back to its source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// 1-based position in the result order
    pub index: usize,
    pub title: String,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.index, self.title)
    }
}

/// The combined context block and its citation list
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub context_block: String,
    pub citations: Vec<Citation>,
}

/// Fold the search hits into one context block, tagging each passage with a
/// numbered citation. Hits stay in service order; nothing is dropped,
/// deduplicated, or truncated.
pub fn assemble(documents: &[SearchDocument]) -> AssembledContext {
    let mut passages = Vec::with_capacity(documents.len());
    let mut citations = Vec::with_capacity(documents.len());

    for (i, document) in documents.iter().enumerate() {
        let title = document
            .title
            .clone()
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
        let citation = Citation {
            index: i + 1,
            title,
        };
        passages.push(format!("{} ({})", document.content, citation));
        citations.push(citation);
    }

    AssembledContext {
        context_block: passages.join("\n"),
        citations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content: &str, title: Option<&str>) -> SearchDocument {
        SearchDocument {
            content: content.to_string(),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn one_citation_per_hit_in_service_order() {
        let documents = vec![
            document("alpha", Some("First")),
            document("beta", Some("Second")),
            document("gamma", Some("Third")),
        ];

        let assembled = assemble(&documents);
        let labels: Vec<String> = assembled
            .citations
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["[1] First", "[2] Second", "[3] Third"]);
    }

    #[test]
    fn missing_title_falls_back_to_unknown_source() {
        let assembled = assemble(&[document("some passage", None)]);
        assert_eq!(assembled.citations[0].to_string(), "[1] Unknown Source");
    }

    #[test]
    fn context_block_has_one_line_per_hit() {
        let documents = vec![
            document("alpha", Some("First")),
            document("beta", None),
            document("gamma", Some("Third")),
        ];

        let assembled = assemble(&documents);
        assert_eq!(assembled.context_block.lines().count(), 3);
    }

    #[test]
    fn no_hits_yield_an_empty_block_and_no_citations() {
        let assembled = assemble(&[]);
        assert_eq!(assembled.context_block, "");
        assert!(assembled.citations.is_empty());
    }

    #[test]
    fn passages_carry_their_citation_labels() {
        let documents = vec![
            document("Paris is the capital of France.", Some("Geo Facts")),
            document("The Eiffel Tower was completed in 1889.", None),
        ];

        let assembled = assemble(&documents);
        assert_eq!(
            assembled.context_block,
            "Paris is the capital of France. ([1] Geo Facts)\nThe Eiffel Tower was completed in 1889. ([2] Unknown Source)"
        );
    }
}
