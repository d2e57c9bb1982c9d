//! Import statements in `.proto` sources

use regex::Regex;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // The terminating `;` is left unconsumed so it can anchor a following
    // import on the same line
    Regex::new(r#"(?m)(?:^|;)\s*import\s+(?:(?:public|weak)\s+)?["']([^"'\n]+)["']"#)
        .expect("import pattern is valid")
});

/// Import paths in `content`, in source order.
///
/// `import "path";` statements (optionally `public`/`weak`) are recognised
/// at the start of a line or after a `;`. `//` comments are dropped first.
pub fn parse_imports(content: &str) -> Vec<String> {
    content
        .lines()
        .map(strip_line_comment)
        .flat_map(|line| {
            IMPORT_RE
                .captures_iter(line)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn strip_line_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

pub fn is_proto_file(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext == "proto")
}
