//! Best-effort conversion of ERB view templates into Django template syntax.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<%([=#-]?)(.*?)-?%>").expect("valid erb tag regex"));
static RE_IVAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid instance variable regex"));
static RE_RENDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^render\s*\(?\s*(?:partial:\s*)?['"]([\w/]+)['"]"#).expect("valid render regex")
});
static RE_EACH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\.each\s+do\s*\|\s*(\w+)\s*\|$").expect("valid each regex")
});
static RE_DO_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdo\s*(?:\|[^|]*\|)?$").expect("valid do-block regex"));

/// Kind of block opened by a tag, closed by the next `<% end %>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    If,
    For,
    Other,
}

/// Converts ERB template text to Django template text.
///
/// Markup outside ERB tags is kept byte for byte. `end` tags close the most
/// recently opened block with the matching Django end tag.
#[must_use]
pub fn convert_erb_to_django(erb: &str) -> String {
    let mut blocks = Vec::new();
    RE_TAG
        .replace_all(erb, |caps: &Captures| {
            let raw = caps[2].trim();
            match &caps[1] {
                "#" => comment_tag(raw),
                "=" => output_tag(&strip_ivars(raw), &mut blocks),
                _ => statement_tag(&strip_ivars(raw), &mut blocks),
            }
        })
        .into_owned()
}

/// Django's `{# #}` comments must fit on one line.
fn comment_tag(text: &str) -> String {
    if text.contains('\n') {
        format!("{{% comment %}}{text}{{% endcomment %}}")
    } else {
        format!("{{# {text} #}}")
    }
}

fn strip_ivars(code: &str) -> String {
    RE_IVAR.replace_all(code, "${1}").into_owned()
}

fn output_tag(code: &str, blocks: &mut Vec<Block>) -> String {
    if let Some(caps) = RE_RENDER.captures(code) {
        return format!("{{% include '{}.html' %}}", &caps[1]);
    }
    if RE_DO_BLOCK.is_match(code) {
        blocks.push(Block::Other);
    }
    format!("{{{{ {code} }}}}")
}

fn statement_tag(code: &str, blocks: &mut Vec<Block>) -> String {
    if code == "end" {
        return match blocks.pop() {
            Some(Block::If) => "{% endif %}".to_string(),
            Some(Block::For) => "{% endfor %}".to_string(),
            Some(Block::Other) | None => "{% end %}".to_string(),
        };
    }
    if code == "else" {
        return "{% else %}".to_string();
    }
    if let Some(cond) = code.strip_prefix("elsif ") {
        return format!("{{% elif {} %}}", cond.trim());
    }
    if let Some(cond) = code.strip_prefix("if ") {
        blocks.push(Block::If);
        return format!("{{% if {} %}}", cond.trim());
    }
    if let Some(cond) = code.strip_prefix("unless ") {
        blocks.push(Block::If);
        return format!("{{% if not {} %}}", cond.trim());
    }
    if let Some(caps) = RE_EACH.captures(code) {
        blocks.push(Block::For);
        return format!("{{% for {} in {} %}}", &caps[2], caps[1].trim());
    }
    if RE_DO_BLOCK.is_match(code) {
        blocks.push(Block::Other);
    }
    format!("{{% {code} %}}")
}
