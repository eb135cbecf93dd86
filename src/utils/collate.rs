use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case- and accent-folded form of `text` used as a sort key.
///
/// The text is decomposed (NFD), combining marks are dropped and the rest is
/// lowercased, so `Åland` folds to `aland` and `Côte` to `cote`.
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
