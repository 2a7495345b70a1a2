use hanzi_lookup::composition::{closure, parser};
use hanzi_lookup::CompositionCatalog;
use regex::Regex;

const DATABASE: &str = "\
好:flows across(女,子)
子:flows down(了,一)
甲:surrounds(日,丨)
乙:single(乙)
丨:single(丨)
garbage line
竟:flows down(立,日,儿)
";

#[test]
fn parse_line_accepts_the_expected_shape() {
    let entry = parser::parse_line("好:flows across(女,子)").expect("entry");
    assert_eq!(entry.character, "好");
    assert_eq!(entry.configuration, "flows across");
    assert_eq!(entry.components, vec!["女", "子"]);
}

#[test]
fn parse_line_drops_duplicate_and_empty_components() {
    let entry = parser::parse_line("林:repeats(木,木,)").expect("entry");
    assert_eq!(entry.components, vec!["木"]);
}

#[test]
fn parse_line_rejects_malformed_shapes() {
    // No colon, no parenthesis, too many parts on either split.
    assert_eq!(parser::parse_line("好女子"), None);
    assert_eq!(parser::parse_line("好:女子"), None);
    assert_eq!(parser::parse_line("好:a:b(女)"), None);
    assert_eq!(parser::parse_line("好:a(b(女)"), None);
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let graph = parser::build(DATABASE.lines());
    assert_eq!(graph.len(), 6);
    assert_eq!(graph.skipped_lines(), 1);
    // Lines after the malformed one are still parsed.
    assert!(graph.get("竟").is_some());
    assert!(graph.get("garbage line").is_none());
}

#[test]
fn duplicate_keys_keep_last_entry() {
    let graph = parser::build(["一:single(一)", "一:flows across(丶)"].into_iter());
    assert_eq!(graph.len(), 1);
    let entry = graph.get("一").expect("entry");
    assert_eq!(entry.configuration, "flows across");
    assert_eq!(entry.components, vec!["丶"]);
}

#[test]
fn closure_includes_transitive_components() {
    let mut graph = parser::build(DATABASE.lines());
    closure::expand(&mut graph);

    // 好 -> 女,子 and 子 -> 了,一, so 好 transitively contains both.
    let entry = graph.get("好").expect("entry");
    assert_eq!(entry.components, vec!["女", "子", "了", "一"]);
}

#[test]
fn closure_superset_law_holds_for_every_entry() {
    let mut graph = parser::build(DATABASE.lines());
    closure::expand(&mut graph);

    let characters: Vec<String> = graph.characters().map(str::to_string).collect();
    for character in &characters {
        let components = graph.get(character).expect("entry").components.clone();
        for direct in &components {
            let Some(sub) = graph.get(direct) else {
                continue;
            };
            for nested in &sub.components {
                assert!(
                    graph
                        .get(character)
                        .expect("entry")
                        .components
                        .contains(nested),
                    "{} is missing {} reached through {}",
                    character,
                    nested,
                    direct
                );
            }
        }
    }
}

#[test]
fn closure_is_idempotent() {
    let mut graph = parser::build(DATABASE.lines());
    closure::expand(&mut graph);
    let expanded_once = graph.clone();
    closure::expand(&mut graph);
    assert_eq!(graph, expanded_once);
}

#[test]
fn closure_terminates_on_cycles() {
    let mut graph = parser::build(["甲:t(乙)", "乙:t(甲)"].into_iter());
    closure::expand(&mut graph);

    assert_eq!(
        graph.get("甲").expect("entry").components,
        vec!["乙", "甲"]
    );
    assert_eq!(
        graph.get("乙").expect("entry").components,
        vec!["甲", "乙"]
    );
}

#[test]
fn closure_terminates_on_self_reference() {
    let mut graph = parser::build(["乙:single(乙)"].into_iter());
    closure::expand(&mut graph);
    assert_eq!(graph.get("乙").expect("entry").components, vec!["乙"]);
}

#[test]
fn find_filters_the_candidate_list() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);

    let matches = catalog.find(&["甲", "乙"], &["丨"], None).expect("find");
    assert_eq!(matches, vec!["甲"]);

    // A candidate absent from the database never matches.
    let matches = catalog.find(&["鼎", "甲"], &["丨"], None).expect("find");
    assert_eq!(matches, vec!["甲"]);
}

#[test]
fn find_matches_components_nested_arbitrarily_deep() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);

    // 一 is a component of 子, which is a component of 好.
    let matches = catalog.find(&["好", "甲"], &["一"], None).expect("find");
    assert_eq!(matches, vec!["好"]);
}

#[test]
fn find_all_scans_the_whole_database_in_insertion_order() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);

    let all_with_sun = catalog.find_all(&["日"], None).expect("find_all");
    assert_eq!(all_with_sun, vec!["甲", "竟"]);

    // find over the full universe of keys agrees with find_all.
    let universe: Vec<String> = ["好", "子", "甲", "乙", "丨", "竟"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let candidates: Vec<&str> = universe.iter().map(String::as_str).collect();
    let via_find = catalog.find(&candidates, &["日"], None).expect("find");
    assert_eq!(via_find, all_with_sun);
}

#[test]
fn configuration_pattern_restricts_matches() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);

    let flows = Regex::new("^flows").expect("pattern");
    let matches = catalog.find_all(&["一"], Some(&flows)).expect("find_all");
    assert_eq!(matches, vec!["好", "子"]);

    let across = Regex::new("across").expect("pattern");
    let matches = catalog.find_all(&["一"], Some(&across)).expect("find_all");
    assert_eq!(matches, vec!["好"]);
}

#[test]
fn empty_required_set_matches_every_decomposed_character() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);
    let matches = catalog.find(&["好", "鼎"], &[], None).expect("find");
    assert_eq!(matches, vec!["好"]);
}

#[test]
fn describe_returns_the_closed_entry() {
    let mut catalog = CompositionCatalog::from_text(DATABASE);

    let entry = catalog.describe("好").expect("query").expect("entry");
    assert_eq!(entry.configuration, "flows across");
    assert_eq!(entry.components, vec!["女", "子", "了", "一"]);

    assert!(catalog.describe("鼎").expect("query").is_none());
}

#[test]
fn catalog_loads_from_a_database_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("decomposition.txt");
    std::fs::write(&path, DATABASE).expect("write database");

    let mut catalog = CompositionCatalog::new(&path);
    let matches = catalog.find_all(&["日"], None).expect("find_all");
    assert_eq!(matches, vec!["甲", "竟"]);
}

#[test]
fn missing_database_file_is_an_error() {
    let mut catalog = CompositionCatalog::new("/nonexistent/decomposition.txt");
    assert!(catalog.find_all(&["日"], None).is_err());
}
