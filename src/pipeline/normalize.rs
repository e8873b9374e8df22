/// Accented uppercase vowels folded to their plain forms in region names
const ACCENT_FOLDS: [(char, char); 5] = [('Á', 'A'), ('É', 'E'), ('Í', 'I'), ('Ó', 'O'), ('Ú', 'U')];

/// Fold the five accented uppercase vowels; every other character is kept.
///
/// The output contains none of the folded characters, so applying this twice
/// is the same as applying it once.
pub fn normalize_region(name: &str) -> String {
    name.chars()
        .map(|c| {
            ACCENT_FOLDS
                .iter()
                .find(|(accented, _)| *accented == c)
                .map(|(_, plain)| *plain)
                .unwrap_or(c)
        })
        .collect()
}
