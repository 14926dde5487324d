//! Identifier normalization.
//!
//! Schema names, property names and enum literals all go through the same
//! word splitter and come out in one of three forms:
//! - [`type_name`]: `pet_store` → `PetStore`
//! - [`file_name`]: `PetStore` → `pet_store`
//! - [`property_name`]: `photoUrls` → `photo_urls`
//!
//! None of these fail. Input with no word characters is returned unchanged;
//! callers check [`has_words`] first when they need a usable identifier.

/// Prefix for type names that would otherwise not start with a capital.
const CONSTANT_PREFIX: &str = "V";

/// PascalCase form, used for type names and enum member constants.
///
/// Always starts with an uppercase letter when the input has words, so the
/// result is a Ruby constant: `2FA` → `V2Fa`.
pub fn type_name(s: &str) -> String {
    let words = split_words(s);
    if words.is_empty() {
        return s.to_string();
    }
    let name: String = words.iter().map(|w| capitalize(w)).collect();
    if name.starts_with(char::is_uppercase) {
        name
    } else {
        format!("{CONSTANT_PREFIX}{name}")
    }
}

/// snake_case form, used for output file names.
pub fn file_name(s: &str) -> String {
    let words = split_words(s);
    if words.is_empty() {
        return s.to_string();
    }
    snake(&words)
}

/// snake_case form that is also a valid member identifier.
pub fn property_name(s: &str) -> String {
    let words = split_words(s);
    if words.is_empty() {
        return s.to_string();
    }
    let name = snake(&words);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Whether `s` contains anything the three forms can build a name from.
pub fn has_words(s: &str) -> bool {
    s.chars().any(char::is_alphanumeric)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::<String>::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let previous = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // `petId`, `v2Name`, and the last capital of `HTTPServer`
            if previous.is_lowercase()
                || previous.is_numeric()
                || (previous.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn snake(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_pascal_case() {
        assert_eq!(type_name("pet"), "Pet");
        assert_eq!(type_name("pet_store"), "PetStore");
        assert_eq!(type_name("Pet_address"), "PetAddress");
        assert_eq!(type_name("petId"), "PetId");
        assert_eq!(type_name("HTTPServer"), "HttpServer");
        assert_eq!(type_name("order-status"), "OrderStatus");
        assert_eq!(type_name("v2Name"), "V2Name");
    }

    #[test]
    fn file_names_are_snake_case() {
        assert_eq!(file_name("PetStore"), "pet_store");
        assert_eq!(file_name("Pet_address"), "pet_address");
        assert_eq!(file_name("HTTPServer"), "http_server");
        assert_eq!(file_name("order.status"), "order_status");
        assert_eq!(file_name("ApiV2Response"), "api_v2_response");
    }

    #[test]
    fn property_names_are_member_identifiers() {
        assert_eq!(property_name("photoUrls"), "photo_urls");
        assert_eq!(property_name("id"), "id");
        assert_eq!(property_name("Content-Type"), "content_type");
        assert_eq!(property_name("2fa_enabled"), "_2fa_enabled");
        assert_eq!(property_name("available"), "available");
    }

    #[test]
    fn type_names_always_start_with_a_capital() {
        assert_eq!(type_name("2FA"), "V2Fa");
        assert_eq!(type_name("2nd"), "V2nd");
        assert_eq!(type_name("_2fa_enabled"), "V2faEnabled");
        assert_eq!(type_name("名前"), "V名前");
        assert_eq!(type_name(&type_name("2FA")), "V2Fa");
    }

    #[test]
    fn word_detection() {
        assert!(has_words("a"));
        assert!(has_words("2"));
        assert!(has_words("on-hold"));
        assert!(!has_words("+"));
        assert!(!has_words("--"));
        assert!(!has_words(""));
    }

    #[test]
    fn normalization_is_stable_under_reapplication() {
        for s in ["PetStore", "photoUrls", "HTTPServer", "Pet_address"] {
            assert_eq!(type_name(&type_name(s)), type_name(s));
            assert_eq!(file_name(&file_name(s)), file_name(s));
        }
    }

    #[test]
    fn degenerate_input_is_returned_unchanged() {
        assert_eq!(type_name(""), "");
        assert_eq!(file_name("--"), "--");
        assert_eq!(property_name("🙂"), "🙂");
    }

    #[test]
    fn non_ascii_letters_stay_in_words() {
        assert_eq!(type_name("größe_wert"), "GrößeWert");
        assert_eq!(file_name("ÉtatCivil"), "état_civil");
    }
}
