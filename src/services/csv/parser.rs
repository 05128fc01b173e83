/// Splits one CSV line into trimmed field values.
///
/// A `"` toggles quoting unless the previous character is a backslash; commas
/// inside quotes do not split. The toggling quotes themselves are dropped. A
/// trailing empty field (line ending in `,`) is not emitted, so a short row
/// simply reads as empty in its last column.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut previous: Option<char> = None;

    for ch in line.chars() {
        match ch {
            '"' if previous != Some('\\') => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
        previous = Some(ch);
    }

    if !current.is_empty() {
        fields.push(current);
    }

    fields.iter().map(|raw| clean_value(raw)).collect()
}

fn clean_value(raw: &str) -> String {
    let value = raw.strip_prefix('"').unwrap_or(raw);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim().to_string()
}

/// Header row plus the sampled data rows of a CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
}

/// Parses the first line as headers and up to `sample_rows` following lines as
/// data. Blank lines inside that window are skipped, not replaced.
pub fn parse_document(content: &str, sample_rows: usize) -> ParsedCsv {
    let mut lines = content.split('\n');
    let headers = lines.next().map(parse_line).unwrap_or_default();

    let sample_rows = lines
        .take(sample_rows)
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();

    ParsedCsv {
        headers,
        sample_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_commas_stay_in_one_field() {
        assert_eq!(parse_line(r#"a,b,"c,d",e"#), vec!["a", "b", "c,d", "e"]);
    }

    #[test]
    fn values_are_trimmed() {
        assert_eq!(parse_line(" id , name "), vec!["id", "name"]);
        assert_eq!(parse_line("id,name\r"), vec!["id", "name"]);
    }

    #[test]
    fn escaped_quote_does_not_toggle() {
        assert_eq!(parse_line(r#"a,say \"hi, there"#), vec!["a", r#"say \"hi"#, "there"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(parse_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn trailing_empty_field_is_dropped() {
        assert_eq!(parse_line("a,b,"), vec!["a", "b"]);
        assert_eq!(parse_line("a,,c"), vec!["a", "", "c"]);
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn document_keeps_header_and_window_of_rows() {
        let csv = "id,name\n1,Alice\n\n2,Bob\n3,Cara\n4,Dan\n5,Eve\n6,Fay";
        let parsed = parse_document(csv, 5);
        assert_eq!(parsed.headers, vec!["id", "name"]);
        // Lines 2..=6 are sampled; the blank one is skipped, not backfilled.
        assert_eq!(parsed.sample_rows.len(), 4);
        assert_eq!(parsed.sample_rows[3], vec!["4", "Dan"]);
    }

    #[test]
    fn empty_document_has_no_headers() {
        let parsed = parse_document("", 5);
        assert!(parsed.headers.is_empty());
        assert!(parsed.sample_rows.is_empty());
    }
}
