use crate::error::{KyattoError, Result};

use regex::Regex;

/// Splits `input` on every non-overlapping match of `pattern`.
///
/// Separators are dropped and tokens are returned in their original order.
/// Consecutive separators produce empty tokens and an empty input produces a
/// single empty token.
pub fn split(input: &str, pattern: &str) -> Result<Vec<String>> {
    let regex = Regex::new(pattern).map_err(|err| {
        KyattoError::ParseError(format!("Invalid separator pattern /{}/: {}", pattern, err))
    })?;
    Ok(split_with(input, &regex))
}

/// Same as [`split`], with a regex compiled ahead of time.
pub fn split_with(input: &str, separator: &Regex) -> Vec<String> {
    separator.split(input).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_split {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected): (&str, Vec<&str>) = $value;

                let tokens = split(input, "[:.]").expect("Failed to split input");

                assert_eq!(tokens, expected);
            }
        )*
        }
    }

    test_split! {
        test_split_0: ("1:02:03.04", vec!["1", "02", "03", "04"]),
        test_split_1: ("1:02.03", vec!["1", "02", "03"]),
        test_split_2: ("a::b", vec!["a", "", "b"]),
        test_split_3: ("", vec![""]),
        test_split_4: ("no separators", vec!["no separators"]),
        test_split_5: (":a", vec!["", "a"]),
        test_split_6: ("0.0.0.0", vec!["0", "0", "0", "0"]),
        test_split_7: ("1:", vec!["1", ""]),
        test_split_8: ("1:00:00.00:", vec!["1", "00", "00", "00", ""]),
    }

    #[test]
    fn test_split_multichar_pattern() {
        let tokens = split("a, b,c", r",\s*").unwrap();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_with_precompiled_regex() {
        let separator = Regex::new("[:.]").unwrap();
        assert_eq!(split_with("0:01.", &separator), vec!["0", "01", ""]);
    }

    #[test]
    fn test_split_invalid_pattern() {
        match split("1:2", "[:.") {
            Err(KyattoError::ParseError(msg)) => assert!(msg.contains("[:.")),
            other => panic!("Expected a parse error, got {:?}", other),
        }
    }
}
