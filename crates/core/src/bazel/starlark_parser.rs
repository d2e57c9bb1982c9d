//! Starlark parser for BUILD manifests using tree-sitter-starlark

use crate::error::{Error, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Parser for Starlark/BUILD files
pub struct StarlarkParser {
    parser: Parser,
}

impl StarlarkParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_starlark::LANGUAGE.into())
            .map_err(|e| Error::ParseError(format!("Failed to set Starlark language: {e}")))?;

        Ok(Self { parser })
    }

    /// Parse BUILD file content into an AST.
    ///
    /// Content with syntax errors is rejected rather than partially read.
    pub fn parse(&mut self, content: &str) -> Result<StarlarkAst> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| Error::ParseError("Failed to parse BUILD file".to_string()))?;

        if tree.root_node().has_error() {
            return Err(Error::ParseError(
                "BUILD file contains syntax errors".to_string(),
            ));
        }

        Ok(StarlarkAst {
            tree,
            source: content.to_string(),
        })
    }

    /// Read and parse a BUILD file from disk
    pub fn parse_file(&mut self, path: &Path) -> Result<StarlarkAst> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
            .map_err(|e| Error::ParseError(format!("{}: {e}", path.display())))
    }
}

/// Parsed Starlark AST
pub struct StarlarkAst {
    pub tree: Tree,
    pub source: String,
}

impl StarlarkAst {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn node_text<'a>(&'a self, node: &Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}
