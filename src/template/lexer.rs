//! Placeholder lexer for template lines using logos

use logos::Logos;

/// A piece of a template line: literal text or a `$<KEY>` placeholder
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Piece<'a> {
    /// A whole placeholder token; carries the key without the `$<` `>` delimiters
    #[regex(r"\$<[A-Za-z0-9_\-]+>", |lex| {
        let s = lex.slice();
        &s[2..s.len() - 1]
    })]
    Placeholder(&'a str),

    /// A run of text without any `$`
    #[regex(r"[^$]+")]
    Text,

    /// A lone `$` that does not open a placeholder
    #[token("$")]
    Dollar,
}

/// Split a line into its pieces, pairing each with the source slice it covers
pub fn pieces(line: &str) -> Vec<(Piece<'_>, &str)> {
    let mut lex = Piece::lexer(line);
    let mut out = Vec::new();
    while let Some(tok) = lex.next() {
        // Every byte is covered by some token, so errors cannot occur; keep the
        // slice as text if one ever does.
        let piece = tok.unwrap_or(Piece::Text);
        out.push((piece, lex.slice()));
    }
    out
}

/// Collect the placeholder keys that appear in a line, in order
pub fn placeholders(line: &str) -> Vec<&str> {
    pieces(line)
        .into_iter()
        .filter_map(|(piece, _)| match piece {
            Piece::Placeholder(key) => Some(key),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let p = pieces("  return true;");
        assert_eq!(p, vec![(Piece::Text, "  return true;")]);
    }

    #[test]
    fn test_single_placeholder() {
        let p = pieces("case $<ENUM>:");
        assert_eq!(
            p,
            vec![
                (Piece::Text, "case "),
                (Piece::Placeholder("ENUM"), "$<ENUM>"),
                (Piece::Text, ":"),
            ]
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(placeholders("$<X>$<Y>,$<COM-002>"), vec!["X", "Y", "COM-002"]);
    }

    #[test]
    fn test_lone_dollar_is_text() {
        let p = pieces("cost $5 and $<>");
        assert_eq!(
            p,
            vec![
                (Piece::Text, "cost "),
                (Piece::Dollar, "$"),
                (Piece::Text, "5 and "),
                (Piece::Dollar, "$"),
                (Piece::Text, "<>"),
            ]
        );
    }

    #[test]
    fn test_placeholder_embedded_in_identifier() {
        assert_eq!(placeholders("&m_sX$<ENUM>,"), vec!["ENUM"]);
    }
}
