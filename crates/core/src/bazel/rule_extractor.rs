//! Extract rule calls from a Starlark AST

use std::collections::HashMap;
use tree_sitter::{Node, TreeCursor};

use super::starlark_parser::StarlarkAst;

/// A rule call in a BUILD file
#[derive(Debug, Clone)]
pub struct RuleCall {
    pub rule_type: String,
    pub name: String,
    pub attributes: HashMap<String, AttributeValue>,
    pub location: SourceLocation,
}

impl RuleCall {
    pub fn string_attr(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(AttributeValue::String(value)) => Some(value),
            _ => None,
        }
    }
}

/// Attribute values in rule calls
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    List(Vec<String>),
    Label(String),
    Glob(GlobPattern),
    Boolean(bool),
}

/// `glob(["*.proto"], exclude = [...])`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobPattern {
    pub patterns: Vec<String>,
    pub exclude: Vec<String>,
}

/// Source location in the BUILD file
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub line: usize,
}

/// Extracts rule calls of selected kinds from a Starlark AST
pub struct RuleExtractor;

impl RuleExtractor {
    /// Extract every call to one of `kinds` that carries a string `name`
    pub fn extract_rules(ast: &StarlarkAst, kinds: &[&str]) -> Vec<RuleCall> {
        let mut rules = Vec::new();
        let mut cursor = ast.tree.walk();

        Self::visit_node(&mut cursor, ast, kinds, &mut rules);

        rules
    }

    fn visit_node(
        cursor: &mut TreeCursor,
        ast: &StarlarkAst,
        kinds: &[&str],
        rules: &mut Vec<RuleCall>,
    ) {
        let node = cursor.node();

        if node.kind() == "call" {
            if let Some(rule) = Self::extract_rule_call(&node, ast, kinds) {
                rules.push(rule);
                // Rule arguments never declare further rules
                return;
            }
        }

        if cursor.goto_first_child() {
            loop {
                Self::visit_node(cursor, ast, kinds, rules);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn extract_rule_call(node: &Node, ast: &StarlarkAst, kinds: &[&str]) -> Option<RuleCall> {
        let function_node = node.child_by_field_name("function")?;
        let rule_type = ast.node_text(&function_node);

        if !kinds.contains(&rule_type) {
            return None;
        }

        let mut attributes = HashMap::new();
        if let Some(args_node) = node.child_by_field_name("arguments") {
            Self::extract_arguments(&args_node, ast, &mut attributes);
        }

        let name = match attributes.get("name") {
            Some(AttributeValue::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                tracing::debug!(
                    "Skipping {} call without a literal name at line {}",
                    rule_type,
                    node.start_position().row + 1
                );
                return None;
            }
        };

        Some(RuleCall {
            rule_type: rule_type.to_string(),
            name,
            attributes,
            location: SourceLocation {
                line: node.start_position().row + 1,
            },
        })
    }

    fn extract_arguments(
        node: &Node,
        ast: &StarlarkAst,
        attributes: &mut HashMap<String, AttributeValue>,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "keyword_argument" {
                continue;
            }
            let (Some(name_node), Some(value_node)) = (
                child.child_by_field_name("name"),
                child.child_by_field_name("value"),
            ) else {
                continue;
            };

            if let Some(value) = Self::extract_value(&value_node, ast) {
                attributes.insert(ast.node_text(&name_node).to_string(), value);
            }
        }
    }

    fn extract_value(node: &Node, ast: &StarlarkAst) -> Option<AttributeValue> {
        match node.kind() {
            "string" => {
                let text = unquote(ast.node_text(node));
                if is_label(&text) {
                    Some(AttributeValue::Label(text))
                } else {
                    Some(AttributeValue::String(text))
                }
            }

            "list" => Some(AttributeValue::List(Self::string_items(node, ast))),

            "call" => {
                let func_node = node.child_by_field_name("function")?;
                if ast.node_text(&func_node) == "glob" {
                    Some(Self::extract_glob_pattern(node, ast))
                } else {
                    // select(), macros and friends are not evaluated
                    None
                }
            }

            "true" => Some(AttributeValue::Boolean(true)),
            "false" => Some(AttributeValue::Boolean(false)),

            _ => None,
        }
    }

    fn string_items(node: &Node, ast: &StarlarkAst) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == "string")
            .map(|child| unquote(ast.node_text(&child)))
            .collect()
    }

    fn extract_glob_pattern(node: &Node, ast: &StarlarkAst) -> AttributeValue {
        let mut glob = GlobPattern::default();

        if let Some(args_node) = node.child_by_field_name("arguments") {
            let mut cursor = args_node.walk();
            for child in args_node.children(&mut cursor) {
                match child.kind() {
                    "list" => glob.patterns = Self::string_items(&child, ast),
                    "keyword_argument" => {
                        let is_exclude = child
                            .child_by_field_name("name")
                            .is_some_and(|name| ast.node_text(&name) == "exclude");
                        if let (true, Some(value)) = (is_exclude, child.child_by_field_name("value")) {
                            if value.kind() == "list" {
                                glob.exclude = Self::string_items(&value, ast);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        AttributeValue::Glob(glob)
    }
}

fn is_label(text: &str) -> bool {
    text.starts_with(':') || text.starts_with("//") || text.starts_with('@')
}

fn unquote(text: &str) -> String {
    text.trim_matches('"').trim_matches('\'').to_string()
}
