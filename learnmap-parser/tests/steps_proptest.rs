//! Property-based tests for step and item extraction
//!
//! - every root `h2` becomes exactly one step, in source order
//! - a step's title only differs from its navtitle when a quote block follows the heading
//! - extracted maps survive a YAML round trip unchanged

use learnmap_parser::{from_yaml, parse_html, to_yaml};
use proptest::prelude::*;

/// Heading text that needs no escaping and has no surrounding whitespace
fn heading_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.!?-]{0,20}[A-Za-z0-9]"
}

/// A step heading, optionally followed by a quote block title
fn step_strategy() -> impl Strategy<Value = (String, Option<String>)> {
    (heading_strategy(), proptest::option::of(heading_strategy()))
}

fn step_html(steps: &[(String, Option<String>)]) -> String {
    let mut html = String::from("<h1>Map</h1><p>Intro</p>");
    for (heading, quote) in steps {
        html.push_str(&format!("<h2>{}</h2>", heading));
        if let Some(quote) = quote {
            html.push_str(&format!("<blockquote>{}</blockquote>", quote));
        }
        html.push_str(&format!(
            "<h3>Column</h3><ul><li><span>title: {}</span></li></ul>",
            heading
        ));
    }
    html
}

proptest! {
    #[test]
    fn one_step_per_heading(steps in prop::collection::vec(step_strategy(), 0..12)) {
        let map = parse_html(&step_html(&steps)).unwrap();
        prop_assert_eq!(map.steps.len(), steps.len());

        for (step, (heading, quote)) in map.steps.iter().zip(&steps) {
            prop_assert_eq!(&step.navtitle, heading);
            match quote {
                Some(quote) => prop_assert_eq!(&step.title, quote),
                None => prop_assert_eq!(&step.title, heading),
            }
            prop_assert_eq!(step.columns()[0].items()[0].get("title"), Some(heading.as_str()));
        }
    }

    #[test]
    fn yaml_round_trip(steps in prop::collection::vec(step_strategy(), 0..6)) {
        let map = parse_html(&step_html(&steps)).unwrap();
        let yaml = to_yaml(&map).unwrap();
        prop_assert_eq!(from_yaml(&yaml).unwrap(), map);
    }
}
