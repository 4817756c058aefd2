mod common;

use common::{at, memory};
use mnemosyne::query::{answer_query, QueryEngine, TimeMode};
use pretty_assertions::assert_eq;

#[test]
fn test_past_cutoff_excludes_later_memories() {
    let memories = vec![
        memory("m-jan", "Remote work suits me.", at(2024, 1, 15), &["remote", "work"]),
        memory("m-mar", "Remote work is lonely.", at(2024, 3, 1), &["remote", "work"]),
        memory("m-jun", "Remote work is fine again.", at(2024, 6, 1), &["remote", "work"]),
    ];

    let rendered =
        QueryEngine::new().answer(&memories, "How did I feel about remote work as of 2024-03-01?");
    assert_eq!(rendered.mode, TimeMode::Past { cutoff: at(2024, 3, 1) });
    assert_eq!(rendered.selected_ids, vec!["m-jan", "m-mar"]);

    let text = rendered.to_string();
    assert!(text.contains("Answer is based on memories available up to the requested time."));
    assert!(!text.contains("Remote work is fine again."));
}

#[test]
fn test_range_question() {
    let memories = vec![
        memory("a", "Tea first.", at(2024, 1, 1), &["tea"]),
        memory("b", "Tea second.", at(2024, 2, 1), &["tea"]),
        memory("c", "Tea third.", at(2024, 3, 1), &["tea"]),
    ];

    let rendered =
        QueryEngine::new().answer(&memories, "What about tea from 2024-01-15 to 2024-02-15?");
    assert_eq!(rendered.selected_ids, vec!["b"]);
    assert!(rendered
        .answer
        .starts_with("Answer is based on memories within the requested time range."));
}

#[test]
fn test_two_element_chain_narrates_once() {
    let root = memory("root", "I believe RAG is the future.", at(2024, 1, 10), &["rag", "future"]);
    let revision = memory(
        "rev",
        "I no longer believe RAG is the future.",
        at(2024, 4, 2),
        &["rag", "future"],
    )
    .with_revision_of("root");

    let text = answer_query(&[root.clone(), revision], "What do I think about rag?");
    let narrations: Vec<&str> = text.lines().filter(|l| l.contains("is revised by")).collect();
    assert_eq!(
        narrations,
        vec!["For rag, future, memory root (2024-01-10T00:00:00Z) is revised by rev (2024-04-02T00:00:00Z)."]
    );

    let single = answer_query(&[root], "What do I think about rag?");
    assert!(!single.contains("is revised by"));
    assert!(single.contains("No significant belief change detected."));
}

#[test]
fn test_chain_outside_selection_is_not_followed() {
    let root = memory("root", "Old view.", at(2024, 1, 1), &["rag"]);
    let revision = memory("rev", "New view.", at(2024, 5, 1), &["rag"]).with_revision_of("root");

    // The cutoff removes the revision, so nothing is narrated.
    let text = answer_query(&[root, revision], "What about rag before 2024-02-01?");
    assert!(text.contains("No significant belief change detected."));
}

#[test]
fn test_empty_store_answer() {
    let text = answer_query(&[], "What do I believe?");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "---");
    assert_eq!(lines[1], "ANSWER:");
    assert_eq!(lines[2], "I don't have enough memory to answer this confidently.");
    assert!(text.contains(
        "CONFIDENCE NOTE:\nConfidence is low. No relevant memories were found for the question."
    ));
    assert_eq!(lines.last(), Some(&"---"));
}

#[test]
fn test_confidence_note_reports_average() {
    let memories = vec![
        memory("a", "One.", at(2024, 1, 1), &["x"]).with_confidence(0.75),
        memory("b", "Two.", at(2024, 1, 2), &["x"]).with_confidence(0.25),
    ];
    let rendered = QueryEngine::new().answer(&memories, "anything");
    assert_eq!(
        rendered.confidence_note,
        "Confidence is moderate. This reflects the average confidence value of the selected memories (0.50) and their direct relevance to the question."
    );
}
