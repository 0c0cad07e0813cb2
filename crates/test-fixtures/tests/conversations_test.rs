//! Every conversation fixture must parse as the comment model.

use agora_core::models::Comment;
use test_fixtures::{fixture_exists, list_fixtures, load_fixture};

#[test]
fn conversation_fixtures_parse() {
    let paths = list_fixtures("conversations");
    assert!(paths.len() >= 3, "expected conversation fixtures, found {paths:?}");
    for path in paths {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let comments: Vec<Comment> = load_fixture(&format!("conversations/{name}"));
        assert!(!comments.is_empty(), "{name} is empty");
    }
}

#[test]
fn grouped_and_single_shapes_both_load() {
    assert!(fixture_exists("conversations/grouped_votes.json"));
    let grouped: Vec<Comment> = load_fixture("conversations/grouped_votes.json");
    assert!(grouped.iter().all(|c| c.vote_info.as_ref().is_some_and(|v| v.is_grouped())));

    let single: Vec<Comment> = load_fixture("conversations/majority_votes.json");
    assert!(single
        .iter()
        .filter_map(|c| c.vote_info.as_ref())
        .all(|v| !v.is_grouped()));
    assert!(single.iter().any(|c| c.vote_info.is_none()));
}
