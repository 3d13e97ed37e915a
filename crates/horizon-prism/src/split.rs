//! Delimiter-aware list splitting.

/// Split `input` on `delim`, ignoring delimiters nested inside
/// parentheses, brackets, braces, or quoted literals.
///
/// Segments are whitespace-trimmed. The result always holds at least one
/// segment; empty input yields a single empty segment.
pub fn split_list(input: &str, delim: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        if let Some(open) = quote {
            current.push(ch);
            if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            _ if ch == delim && depth == 0 => {
                segments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    segments.push(current.trim().to_string());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            split_list(" a , b ,c", ','),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn ignores_nested_delimiters() {
        assert_eq!(
            split_list("rgba(0, 0, 0, 0.5), 10%", ','),
            vec!["rgba(0, 0, 0, 0.5)".to_string(), "10%".to_string()]
        );
    }

    #[test]
    fn ignores_quoted_delimiters() {
        assert_eq!(
            split_list("'one, two', three", ','),
            vec!["'one, two'".to_string(), "three".to_string()]
        );
    }

    #[test]
    fn empty_input_yields_one_segment() {
        assert_eq!(split_list("", ','), vec![String::new()]);
    }

    #[test]
    fn unbalanced_close_does_not_underflow() {
        assert_eq!(
            split_list("a), b", ','),
            vec!["a)".to_string(), "b".to_string()]
        );
    }
}
