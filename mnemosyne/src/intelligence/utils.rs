use std::collections::HashSet;

/// Whether two topic lists share at least one keyword.
pub fn topics_overlap(a: &[String], b: &[String]) -> bool {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    b.iter().any(|t| set_a.contains(t.as_str()))
}

/// First topic of `a` (in its own order) that also appears in `b`.
pub fn first_shared_topic<'a>(a: &'a [String], b: &[String]) -> Option<&'a str> {
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter().map(String::as_str).find(|t| set_b.contains(t))
}
