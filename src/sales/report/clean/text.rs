/// Title-cases `value` word by word.
///
/// Words are separated by whitespace only: the first character of each word is
/// uppercased and the remaining characters lowercased. Whitespace between words
/// is kept as-is. A leading character whose uppercase form spans several
/// characters (`ß` → `SS`) is kept unchanged, so the transformation is
/// idempotent.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for ch in value.chars() {
        if ch.is_whitespace() {
            result.push(ch);
            at_word_start = true;
        } else if at_word_start {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => result.push(single),
                _ => result.push(ch),
            }
            at_word_start = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn capitalizes_each_whitespace_separated_word() {
        assert_eq!(title_case("jane DOE"), "Jane Doe");
        assert_eq!(title_case("north-east"), "North-east");
        assert_eq!(title_case("o'neil  smith"), "O'neil  Smith");
    }

    #[test]
    fn is_idempotent() {
        let once = title_case("wIDGET pro\tmax");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn keeps_leading_letters_without_single_char_uppercase() {
        assert_eq!(title_case("ßen STRAßE"), "ßen Straße");
        assert_eq!(title_case(&title_case("ßen")), "ßen");
    }

    #[test]
    fn handles_non_ascii_letters() {
        assert_eq!(title_case("élodie ÅSTRÖM"), "Élodie Åström");
    }
}
