use std::sync::LazyLock;

use regex::Regex;

use super::errors::ParseError;
use crate::desktop::WindowRect;

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^X=(-?\d+), Y=(-?\d+), Width=(-?\d+), Height=(-?\d+)")
        .expect("Invalid coordinate pattern")
});

/// Parse a signed integer, ignoring surrounding whitespace.
pub fn parse_int(text: &str) -> Result<i32, ParseError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidNumber {
            input: text.trim().to_string(),
        })
}

/// Like [`parse_int`], but blank input means "keep the current value".
pub fn parse_optional_int(text: &str) -> Result<Option<i32>, ParseError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_int(text).map(Some)
}

/// Parse `X=<int>, Y=<int>, Width=<int>, Height=<int>`.
///
/// This is the same text `get_pos` prints after its label, so a position can
/// be copied from one window and pasted onto another. The pattern must start
/// the input; anything after it is ignored.
pub fn parse_coordinates(text: &str) -> Result<WindowRect, ParseError> {
    let invalid = || ParseError::InvalidCoordinateFormat {
        input: text.trim().to_string(),
    };

    let captures = COORDINATES.captures(text.trim()).ok_or_else(invalid)?;
    let field = |i: usize| -> Result<i32, ParseError> {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(invalid)
    };

    Ok(WindowRect::new(field(1)?, field(2)?, field(3)?, field(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("  -7 \n"), Ok(-7));
        assert_eq!(
            parse_int("abc"),
            Err(ParseError::InvalidNumber {
                input: "abc".to_string()
            })
        );
        assert!(parse_int("").is_err());
        assert!(parse_int("1.5").is_err());
    }

    #[test]
    fn test_parse_optional_int() {
        assert_eq!(parse_optional_int(""), Ok(None));
        assert_eq!(parse_optional_int("   "), Ok(None));
        assert_eq!(parse_optional_int("800"), Ok(Some(800)));
        assert!(parse_optional_int("wide").is_err());
    }

    #[test]
    fn test_parse_coordinates() {
        let rect = parse_coordinates("X=-7, Y=0, Width=466, Height=359").unwrap();
        assert_eq!(rect, WindowRect::new(-7, 0, 466, 359));
    }

    #[test]
    fn test_parse_coordinates_accepts_get_pos_output() {
        let printed = format!("{}", WindowRect::new(10, 20, 300, 400));
        assert_eq!(
            parse_coordinates(&printed),
            Ok(WindowRect::new(10, 20, 300, 400))
        );
    }

    #[test]
    fn test_parse_coordinates_rejects_non_numeric() {
        let err = parse_coordinates("X=abc, Y=0, Width=466, Height=359").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCoordinateFormat { .. }));
    }

    #[test]
    fn test_parse_coordinates_rejects_wrong_shape() {
        assert!(parse_coordinates("").is_err());
        assert!(parse_coordinates("X=1,Y=2,Width=3,Height=4").is_err());
        assert!(parse_coordinates("x=1, y=2, width=3, height=4").is_err());
        assert!(parse_coordinates("X=1, Y=2, Width=3").is_err());
        assert!(parse_coordinates("pos: X=1, Y=2, Width=3, Height=4").is_err());
    }

    #[test]
    fn test_parse_coordinates_out_of_range() {
        let err = parse_coordinates("X=99999999999, Y=0, Width=1, Height=1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCoordinateFormat { .. }));
    }
}
