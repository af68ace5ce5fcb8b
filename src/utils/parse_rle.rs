use crate::{Cell, PatternError};

/// Largest accepted `x * y` of a pattern header.
pub const MAX_PATTERN_AREA: i64 = 1 << 26;

/// Parses a pattern in RLE format into its live cells.
///
/// The top-left corner of the declared box is `(0, 0)`; rows grow towards +y.
pub fn parse_rle(data: &str) -> Result<Vec<Cell>, PatternError> {
    // skipping comment lines and blank lines
    let mut lines = data
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    // next line must start with 'x'; parsing sizes
    let (_, header) = lines.next().ok_or(PatternError::MissingHeader)?;
    let (width, height) = parse_header(header)?;

    // run-length encoded pattern data
    let mut result = vec![];
    let (mut x, mut y) = (0i64, 0i64);
    let mut cnt: Option<i64> = None;
    'body: for (line_no, line) in lines {
        for symbol in line.chars() {
            let run = cnt.unwrap_or(1);
            let overflow = PatternError::RunLengthOverflow { line: line_no };
            match symbol {
                '0'..='9' => {
                    let digit = i64::from(symbol as u8 - b'0');
                    let next = cnt
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or(overflow)?;
                    cnt = Some(next);
                    continue;
                }
                'o' => {
                    let end = x.checked_add(run).ok_or(overflow)?;
                    if y >= height || end > width {
                        let cell = if y < height && x < width {
                            Cell::new(width, y)
                        } else {
                            Cell::new(x, y)
                        };
                        return Err(PatternError::OutOfBounds {
                            cell,
                            width,
                            height,
                        });
                    }
                    result.extend((x..end).map(|x| Cell::new(x, y)));
                    x = end;
                }
                'b' => x = x.checked_add(run).ok_or(overflow)?,
                '$' => (x, y) = (0, y.checked_add(run).ok_or(overflow)?),
                '!' => break 'body,
                c if c.is_whitespace() => continue,
                c => {
                    return Err(PatternError::UnexpectedSymbol {
                        symbol: c,
                        line: line_no,
                    })
                }
            }
            cnt = None;
        }
    }
    tracing::debug!(width, height, cells = result.len(), "parsed RLE pattern");
    Ok(result)
}

/// Parses `x = W, y = H[, rule = B3/S23]`.
fn parse_header(header: &str) -> Result<(i64, i64), PatternError> {
    let invalid = || PatternError::InvalidHeader(header.to_string());
    let (mut width, mut height) = (None, None);
    for field in header.split(',') {
        let (key, value) = field.split_once('=').ok_or_else(invalid)?;
        let value = value.trim();
        match key.trim() {
            "x" => width = Some(value.parse::<i64>().map_err(|_| invalid())?),
            "y" => height = Some(value.parse::<i64>().map_err(|_| invalid())?),
            "rule" => {
                if !is_conway_rule(value) {
                    return Err(PatternError::UnsupportedRule(value.to_string()));
                }
            }
            _ => return Err(invalid()),
        }
    }
    match (width, height) {
        (Some(w), Some(h)) if w >= 0 && h >= 0 => {
            match w.checked_mul(h) {
                Some(area) if area <= MAX_PATTERN_AREA => Ok((w, h)),
                _ => Err(PatternError::TooLarge {
                    width: w,
                    height: h,
                }),
            }
        }
        _ => Err(invalid()),
    }
}

fn is_conway_rule(rule: &str) -> bool {
    let rule = rule.to_ascii_uppercase();
    matches!(rule.as_str(), "B3/S23" | "S23/B3" | "23/3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_rule() {
        assert_eq!(parse_header("x = 3, y = 2, rule = b3/s23"), Ok((3, 2)));
        assert_eq!(parse_header("x=10,y=1"), Ok((10, 1)));
    }

    #[test]
    fn header_errors() {
        assert!(matches!(
            parse_header("x = 3"),
            Err(PatternError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_header("x = a, y = 2"),
            Err(PatternError::InvalidHeader(_))
        ));
        assert_eq!(
            parse_header("x = 3, y = 3, rule = B36/S23"),
            Err(PatternError::UnsupportedRule("B36/S23".to_string()))
        );
    }

    #[test]
    fn comments_and_multiline_body() {
        let rle = "#N Glider\n#C comment\nx = 3, y = 3\nbo$2b\no$3o!\n";
        let cells = parse_rle(rle).unwrap();
        let expected = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)].map(Cell::from);
        assert_eq!(cells, expected);
    }

    #[test]
    fn multi_digit_runs_and_row_skips() {
        let cells = parse_rle("x = 12, y = 3\n12o2$o!").unwrap();
        assert_eq!(cells.len(), 13);
        assert_eq!(cells.last(), Some(&Cell::new(0, 2)));
    }

    #[test]
    fn missing_header() {
        assert_eq!(parse_rle("# only comments\n"), Err(PatternError::MissingHeader));
    }

    #[test]
    fn unexpected_symbol() {
        assert_eq!(
            parse_rle("x = 2, y = 1\noz!"),
            Err(PatternError::UnexpectedSymbol {
                symbol: 'z',
                line: 2
            })
        );
    }

    #[test]
    fn out_of_bounds() {
        assert!(matches!(
            parse_rle("x = 2, y = 1\n3o!"),
            Err(PatternError::OutOfBounds { .. })
        ));
        assert!(matches!(
            parse_rle("x = 2, y = 1\n$o!"),
            Err(PatternError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn huge_run_overflows() {
        assert_eq!(
            parse_rle("x = 1, y = 1\n99999999999999999999o!"),
            Err(PatternError::RunLengthOverflow { line: 2 })
        );
    }

    #[test]
    fn huge_skips_overflow() {
        let max = i64::MAX;
        assert_eq!(
            parse_rle(&format!("x = 1, y = 1\n{max}b{max}bo!")),
            Err(PatternError::RunLengthOverflow { line: 2 })
        );
        assert_eq!(
            parse_rle(&format!("x = 1, y = 1\n{max}${max}$o!")),
            Err(PatternError::RunLengthOverflow { line: 2 })
        );
        assert_eq!(
            parse_rle(&format!("x = 4, y = 1\n2b{max}o!")),
            Err(PatternError::RunLengthOverflow { line: 2 })
        );
    }

    #[test]
    fn oversized_box_is_rejected() {
        let max = i64::MAX;
        assert_eq!(
            parse_rle(&format!("x = {max}, y = 1\n4000000000o!")),
            Err(PatternError::TooLarge {
                width: max,
                height: 1
            })
        );
        assert_eq!(
            parse_header("x = 8193, y = 8192"),
            Err(PatternError::TooLarge {
                width: 8193,
                height: 8192
            })
        );
        assert_eq!(parse_header("x = 8192, y = 8192"), Ok((8192, 8192)));
    }

    #[test]
    fn long_run_past_the_box_fails_at_the_edge() {
        assert_eq!(
            parse_rle("x = 3, y = 2\n$b4000000000o!"),
            Err(PatternError::OutOfBounds {
                cell: Cell::new(3, 1),
                width: 3,
                height: 2
            })
        );
    }
}
