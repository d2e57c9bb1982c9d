//! Render generated rules as BUILD file text

use protolake_core::rules::{AttrValue, PlatformStrings, Rule, loads_for};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Load statements for the emitted kinds, then each rule separated by a
/// blank line
pub fn render_build_file(rules: &[Rule]) -> String {
    let mut out = String::new();

    let loads = loads_for(rules);
    for (file, symbols) in &loads {
        let symbols: Vec<String> = symbols.iter().map(|s| quote(s)).collect();
        let _ = writeln!(out, "load({}, {})", quote(file), symbols.join(", "));
    }
    if !loads.is_empty() && !rules.is_empty() {
        out.push('\n');
    }

    let rendered: Vec<String> = rules.iter().map(render_rule).collect();
    out.push_str(&rendered.join("\n"));
    out
}

pub fn render_rule(rule: &Rule) -> String {
    let mut out = format!("{}(\n", rule.kind);
    let _ = writeln!(out, "{INDENT}name = {},", quote(&rule.name));
    for (key, value) in &rule.attrs {
        let _ = writeln!(out, "{INDENT}{key} = {},", render_value(value));
    }
    out.push_str(")\n");
    out
}

fn render_value(value: &AttrValue) -> String {
    match value {
        AttrValue::String(s) => quote(s),
        AttrValue::List(items) => render_list(items, 1),
        AttrValue::Platform(strings) => render_platform(strings),
    }
}

fn render_platform(strings: &PlatformStrings) -> String {
    let generic = render_list(&strings.generic, 1);
    if strings.platforms.is_empty() {
        return generic;
    }

    let mut select = String::from("select({\n");
    for (platform, items) in &strings.platforms {
        let _ = writeln!(
            select,
            "{INDENT}{INDENT}{}: {},",
            quote(platform),
            render_list(items, 2)
        );
    }
    let _ = write!(select, "{INDENT}{INDENT}\"//conditions:default\": [],\n{INDENT}}})");
    format!("{generic} + {select}")
}

/// Single-item lists stay on one line
fn render_list(items: &[String], depth: usize) -> String {
    match items {
        [] => "[]".to_string(),
        [single] => format!("[{}]", quote(single)),
        _ => {
            let inner = INDENT.repeat(depth + 1);
            let outer = INDENT.repeat(depth);
            let body: String = items.iter().map(|item| format!("{inner}{},\n", quote(item))).collect();
            format!("[\n{body}{outer}]")
        }
    }
}

fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
