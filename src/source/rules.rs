//! Extraction rules: pure functions from file text to source records.
//!
//! Each rule looks at one file's raw text in isolation. Patterns are compiled
//! once and shared.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{Association, AssociationKind, Controller, DomainRecord, Route, COLLECTION_ACTIONS};

static RE_RECORD_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+(\w+)\s*<\s*ApplicationRecord\b").expect("valid record class regex")
});
static RE_ATTR_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\battr_accessor\s+(:\w+(?:\s*,\s*:\w+)*)").expect("valid accessor regex")
});
// Longer keywords first so `has_one_attached` is never read as `has_one`.
static RE_ASSOCIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(has_many|has_one_attached|has_one|has_rich_text|belongs_to)\s+:(\w+)")
        .expect("valid association regex")
});
static RE_CONTROLLER_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+(\w+Controller)\s*<\s*ApplicationController\b")
        .expect("valid controller class regex")
});
static RE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdef\s+(?:self\.)?([A-Za-z_]\w*[!?]?)").expect("valid def regex")
});
static RE_BEFORE_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bbefore_(?:action|filter)\s+:(\w+[!?]?)").expect("valid filter regex")
});
static RE_FINDER_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+\s*=\s*(\w+)\.find").expect("valid finder regex"));
static RE_RESOURCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bresources\s+:(\w+)").expect("valid resources regex"));
static RE_VERB_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:get|post|put|patch|delete)\s+['"]([^'"]+)['"]\s*,\s*to:\s*['"]([^'"]+)['"]"#,
    )
    .expect("valid verb route regex")
});
static RE_IVAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid instance variable regex"));

/// Extracts a domain record if the text declares an `ApplicationRecord` subclass.
#[must_use]
pub fn extract_record(text: &str) -> Option<DomainRecord> {
    let name = RE_RECORD_CLASS.captures(text)?[1].to_string();

    let attributes = RE_ATTR_ACCESSOR
        .captures_iter(text)
        .flat_map(|caps| {
            caps[1]
                .split(',')
                .map(|sym| sym.trim().trim_start_matches(':').to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let associations = RE_ASSOCIATION
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = AssociationKind::from_keyword(&caps[1])?;
            Some(Association { kind, target: caps[2].to_string() })
        })
        .collect();

    Some(DomainRecord { name, attributes, associations })
}

/// Extracts a controller if the text declares an `ApplicationController` subclass.
#[must_use]
pub fn extract_controller(text: &str) -> Option<Controller> {
    let name = RE_CONTROLLER_CLASS.captures(text)?[1].to_string();
    let actions = RE_DEF.captures_iter(text).map(|caps| caps[1].to_string()).collect();
    let before_filters =
        RE_BEFORE_FILTER.captures_iter(text).map(|caps| caps[1].to_string()).collect();
    let inferred_model = RE_FINDER_ASSIGN.captures(text).map(|caps| caps[1].to_string());

    Some(Controller { name, actions, before_filters, inferred_model })
}

/// Extracts every route binding from the routes file text.
///
/// Collection routes come first, then explicit routes, each in file order.
#[must_use]
pub fn extract_routes(text: &str) -> Vec<Route> {
    let collections = RE_RESOURCES.captures_iter(text).map(|caps| {
        let controller = caps[1].to_string();
        Route::Collection {
            path: format!("/{controller}"),
            controller,
            actions: COLLECTION_ACTIONS.iter().map(ToString::to_string).collect(),
        }
    });

    let explicit = RE_VERB_ROUTE.captures_iter(text).filter_map(|caps| {
        let (controller, action) = split_mapping(&caps[2])?;
        Some(Route::Explicit {
            path: format!("/{}", caps[1].trim_start_matches('/')),
            controller: controller.to_string(),
            action: action.to_string(),
        })
    });

    collections.chain(explicit).collect()
}

/// Splits `controller#action`; anything without exactly one `#` is rejected.
fn split_mapping(mapping: &str) -> Option<(&str, &str)> {
    let mut parts = mapping.split('#');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(controller), Some(action), None) => Some((controller, action)),
        _ => None,
    }
}

/// Sorted, deduplicated instance variables referenced in template text.
#[must_use]
pub fn template_variables(text: &str) -> BTreeSet<String> {
    RE_IVAR.captures_iter(text).map(|caps| caps[1].to_string()).collect()
}

/// Template name for a path relative to the views root, or `None` if it is not a template.
///
/// `posts/index.html.erb` becomes `posts/index`.
#[must_use]
pub fn template_name(relative: &Path) -> Option<String> {
    let rel = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    rel.strip_suffix(".html.erb").or_else(|| rel.strip_suffix(".erb")).map(str::to_string)
}
