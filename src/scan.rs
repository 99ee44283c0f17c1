/// Classification of the first substantive token in a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    /// The text begins with a token that can open a top-level item.
    Item,
    /// The text begins with statement- or expression-level code.
    Bare,
    /// Only comments or whitespace before end of input.
    Empty,
}

/// Keywords that can open a top-level item. `const` and `unsafe` can also
/// open statements; when in doubt we assume item, and let the parser decide.
const ITEM_KEYWORDS: &[&str] = &[
    "async", "const", "enum", "extern", "fn", "impl", "macro", "macro_rules", "mod", "pub",
    "static", "struct", "trait", "type", "union", "unsafe", "use",
];

/// Skip leading whitespace and comments and classify the first substantive
/// token of `source`.
///
/// This is a lexical heuristic, not a parse: it only decides whether the
/// text already reads like a complete source file. It is total over any
/// input and tolerates unterminated block comments and unparseable tails.
pub fn classify(source: &str) -> Lead {
    let mut rest = source;

    loop {
        rest = rest.trim_start();

        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
            continue;
        }

        if let Some(after) = rest.strip_prefix("/*") {
            rest = skip_block_comment(after);
            continue;
        }

        break;
    }

    if rest.is_empty() {
        return Lead::Empty;
    }

    // Attributes (and shebang lines) always belong to item position.
    if rest.starts_with('#') {
        return Lead::Item;
    }

    let word_len = rest
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(rest.len());

    if ITEM_KEYWORDS.contains(&&rest[..word_len]) {
        Lead::Item
    } else {
        Lead::Bare
    }
}

/// Advance past a (possibly nested) block comment whose opening `/*` has
/// already been consumed. An unterminated comment swallows the rest of the
/// text.
fn skip_block_comment(mut rest: &str) -> &str {
    let mut depth = 1usize;

    while depth > 0 {
        match (rest.find("/*"), rest.find("*/")) {
            (Some(open), Some(close)) if open < close => {
                depth += 1;
                rest = &rest[open + 2..];
            }
            (_, Some(close)) => {
                depth -= 1;
                rest = &rest[close + 2..];
            }
            _ => return "",
        }
    }

    rest
}
