use crate::domain::topics::{Topic, TopicList};

pub const TOPICS_PARAM: &str = "topics";
pub const PAGE_PARAM: &str = "page";

/// A client-side URL change: replaces the current history entry, keeps scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    pub replace: bool,
    pub scroll: bool,
}

fn decode(part: &str) -> String {
    let spaced = part.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|c| c.into_owned())
        .unwrap_or(spaced)
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(p), String::new()),
        })
        .collect()
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

/// Reads the comma-joined `topics` parameter back into a selection.
pub fn selected_topics_from_query(query: &str) -> TopicList {
    parse_pairs(query)
        .into_iter()
        .find(|(k, _)| k == TOPICS_PARAM)
        .map(|(_, v)| TopicList::parse(&v))
        .unwrap_or_default()
}

/// Writes a new selection into `current_query`. Pagination is always reset.
pub fn topics_navigation(current_query: &str, selection: &[Topic]) -> Navigation {
    let topics_value = (!selection.is_empty()).then(|| {
        selection
            .iter()
            .map(|t| urlencoding::encode(t.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",")
    });

    let mut parts: Vec<String> = Vec::new();
    let mut wrote_topics = false;
    for (k, v) in parse_pairs(current_query) {
        if k == PAGE_PARAM {
            continue;
        }
        if k == TOPICS_PARAM {
            if let Some(value) = topics_value.as_ref().filter(|_| !wrote_topics) {
                parts.push(format!("{TOPICS_PARAM}={value}"));
                wrote_topics = true;
            }
            continue;
        }
        parts.push(encode_pair(&k, &v));
    }
    if let Some(value) = topics_value.as_ref().filter(|_| !wrote_topics) {
        parts.push(format!("{TOPICS_PARAM}={value}"));
    }

    Navigation {
        href: format!("?{}", parts.join("&")),
        replace: true,
        scroll: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Vec<Topic> {
        TopicList::parse(s).into_vec()
    }

    #[test]
    fn sets_topics_and_drops_page() {
        let nav = topics_navigation("?status=live&page=3", &sel("a, b, c"));
        assert_eq!(nav.href, "?status=live&topics=a,b,c");
        assert!(nav.replace);
        assert!(!nav.scroll);
    }

    #[test]
    fn replaces_existing_topics_in_place() {
        let nav = topics_navigation("topics=old&q=x", &sel("new"));
        assert_eq!(nav.href, "?topics=new&q=x");
    }

    #[test]
    fn empty_selection_removes_param() {
        let nav = topics_navigation("?topics=a,b&page=2&q=team", &[]);
        assert_eq!(nav.href, "?q=team");
        assert_eq!(topics_navigation("", &[]).href, "?");
    }

    #[test]
    fn encodes_special_characters() {
        let nav = topics_navigation("", &sel("Q&A session, project/planning"));
        assert_eq!(nav.href, "?topics=Q%26A%20session,project%2Fplanning");
        let back = selected_topics_from_query(&nav.href);
        assert_eq!(back.to_strings(), vec!["Q&A session", "project/planning"]);
    }

    #[test]
    fn reads_selection_back() {
        assert_eq!(
            selected_topics_from_query("?page=1&topics=meeting%2Cplanning").to_strings(),
            vec!["meeting", "planning"]
        );
        assert_eq!(
            selected_topics_from_query("topics=team+sync,,x").to_strings(),
            vec!["team sync", "x"]
        );
        assert!(selected_topics_from_query("?q=1").is_empty());
    }
}
