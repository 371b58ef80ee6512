/// Quote a sheet name for use in a formula reference.
///
/// Quotes only when needed; the formula grammar uses single quotes with
/// doubled embedded quotes.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        return name.to_string();
    }
    let escaped = name.replace('\'', "''");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(quote_sheet_name("Weights"), "Weights");
        assert_eq!(quote_sheet_name("Sheet_2"), "Sheet_2");
    }

    #[test]
    fn names_with_spaces_or_digit_prefixes_are_quoted() {
        assert_eq!(quote_sheet_name("Z-Score Normalised"), "'Z-Score Normalised'");
        assert_eq!(quote_sheet_name("2024 Plan"), "'2024 Plan'");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(quote_sheet_name("Bob's"), "'Bob''s'");
    }
}
