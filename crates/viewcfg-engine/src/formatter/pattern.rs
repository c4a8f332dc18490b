//! Translation of `yyyy-MM-dd HH:mm:ss` style patterns into chrono strftime.

use crate::error::FormatError;

fn run_length(chars: &[char], start: usize) -> usize {
    let c = chars[start];
    chars[start..].iter().take_while(|&&x| x == c).count()
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Convert a custom date/time pattern to a chrono format string.
///
/// Supported specifiers: `y M d H h m s f t`, quoted literals (`'..'` or
/// `".."`) and backslash escapes. Time-zone specifiers are rejected since
/// formatted values carry no offset.
pub fn to_strftime(pattern: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(|| FormatError::Pattern(format!("unterminated quote in {:?}", pattern)))?;
                for &lit in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, lit);
                }
                i += close + 2;
                continue;
            }
            '\\' => {
                let next = chars
                    .get(i + 1)
                    .ok_or_else(|| FormatError::Pattern(format!("dangling escape in {:?}", pattern)))?;
                push_literal(&mut out, *next);
                i += 2;
                continue;
            }
            _ => {}
        }

        let n = run_length(&chars, i);
        let spec = match (c, n) {
            ('y', 1 | 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', 2) => "%d",
            ('d', 3) => "%a",
            ('d', _) => "%A",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('f' | 'F', 1..=3) => "%3f",
            ('f' | 'F', 4..=6) => "%6f",
            ('f' | 'F', _) => "%9f",
            ('t', _) => "%p",
            ('z' | 'K', _) => {
                return Err(FormatError::Pattern(format!(
                    "time zone specifier {:?} is not supported",
                    c
                )));
            }
            _ => {
                push_literal(&mut out, c);
                i += 1;
                continue;
            }
        };
        out.push_str(spec);
        i += n;
    }

    Ok(out)
}

/// Whether the pattern renders any time-of-day component
pub fn has_time(strftime: &str) -> bool {
    ["%H", "%-H", "%I", "%-I", "%M", "%-M", "%S", "%-S"]
        .iter()
        .any(|spec| strftime.contains(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        assert_eq!(to_strftime("yyyy-MM-dd HH:mm:ss").unwrap(), "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_literals_and_escapes() {
        assert_eq!(to_strftime("dd 'at' HH\\h").unwrap(), "%d at %Hh");
        assert_eq!(to_strftime("d/M/yy 100%").unwrap(), "%-d/%-m/%y 100%%");
        assert_eq!(to_strftime("hh:mm tt").unwrap(), "%I:%M %p");
        assert_eq!(to_strftime("HH:mm:ss.fff").unwrap(), "%H:%M:%S.%3f");
    }

    #[test]
    fn test_rejects_bad_patterns() {
        assert!(to_strftime("yyyy 'open").is_err());
        assert!(to_strftime("HH\\").is_err());
        assert!(to_strftime("HH:mm zzz").is_err());
    }

    #[test]
    fn test_has_time() {
        assert!(has_time("%Y-%m-%d %H:%M"));
        assert!(!has_time("%Y-%m-%d"));
    }
}
