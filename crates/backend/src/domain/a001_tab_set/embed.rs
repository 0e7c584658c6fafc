//! Markup skeleton for embedding a stored tab set into a page.
//!
//! The output carries no behavior: the frontend runtime finds every
//! `[data-tabs]` container and wires roles, ids and keyboard handling onto it.

use ammonia::clean_text;
use contracts::domain::a001_tab_set::TabSet;
use std::fmt::Write;

use super::service::sanitize_content;

pub fn render(set: &TabSet) -> String {
    if set.tabs.is_empty() {
        return render_missing();
    }

    let uid = clean_text(&format!("tabs-{}", set.id));
    let mut html = String::new();

    let _ = write!(html, "<div class=\"tabs\" data-tabs=\"{}\">", uid);
    let _ = write!(
        html,
        "<div class=\"tabs__tablist\" aria-label=\"{}\" data-tab-list>",
        clean_text(&set.name)
    );
    for (i, tab) in set.tabs.iter().enumerate() {
        let init = if i == 0 { " data-tab-init" } else { "" };
        let _ = write!(
            html,
            "<button class=\"tabs__tab\" type=\"button\" data-tab{}>{}</button>",
            init,
            clean_text(&tab.title)
        );
    }
    html.push_str("</div>");

    for tab in &set.tabs {
        let _ = write!(
            html,
            "<div class=\"tabs__panel\" data-tab-panel>{}</div>",
            sanitize_content(&tab.content)
        );
    }
    html.push_str("</div>");
    html
}

pub fn render_missing() -> String {
    "<!-- Custom Tabs: set not found or empty -->".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_tab_set::{Tab, TabSetId};

    fn set(tabs: Vec<Tab>) -> TabSet {
        TabSet {
            id: TabSetId::new("tab-set-demo"),
            name: "Demo \"set\"".into(),
            tabs,
        }
    }

    #[test]
    fn test_render_pairs_and_init_marker() {
        let html = render(&set(vec![
            Tab::new("One", "<p>a</p>"),
            Tab::new("Two & more", "<p>b</p>"),
        ]));

        assert!(html.starts_with("<div class=\"tabs\" data-tabs=\"tabs-tab-set-demo\">"));
        assert!(html.contains("aria-label=\"Demo&#32;&quot;set&quot;\""));
        assert_eq!(html.matches("data-tab-init").count(), 1);
        assert_eq!(html.matches("<button").count(), 2);
        assert_eq!(html.matches("data-tab-panel").count(), 2);
        assert!(html.contains(">Two&#32;&amp;&#32;more</button>"));
        assert!(!html.contains("\"set\""));
        // first button carries the init marker
        let first_button = html.find("<button").unwrap();
        let init = html.find("data-tab-init").unwrap();
        let second_button = html[first_button + 1..].find("<button").unwrap() + first_button + 1;
        assert!(init > first_button && init < second_button);
    }

    #[test]
    fn test_render_sanitizes_content() {
        let html = render(&set(vec![Tab::new("One", "<p>ok</p><script>x</script>")]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>ok</p>"));
    }

    #[test]
    fn test_render_empty_set_is_comment() {
        assert!(render(&set(vec![])).starts_with("<!--"));
    }
}
