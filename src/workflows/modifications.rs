use regex::Regex;
use std::sync::LazyLock;

// Letters, numbers and underscore count as word characters; combining marks
// and connector punctuation are stripped.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").unwrap());
static SEASON_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(season|stage)\s*[0-9]+\s*").unwrap());
// Ordinal suffix letters are matched as a character class, not as alternatives.
static ORDINAL_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[0-9]*[st|nd|rd|th]+\s*(season|stage)\s*").unwrap());

/// A text transform that derives alternative search names from one name.
///
/// Rules never fail. A rule that does not apply to a name yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameModification {
    /// Strip punctuation, cut at the first colon, cut at the first comma.
    PunctuationSplit,
    /// Drop "season 2" / "stage 3" and "2nd season" style markers.
    SeasonNumber,
    /// Keep only the first three, then the first two words.
    LeadingWords,
}

/// Modification rules in the order they are tried.
pub const MODIFICATIONS: [NameModification; 3] = [
    NameModification::PunctuationSplit,
    NameModification::SeasonNumber,
    NameModification::LeadingWords,
];

impl NameModification {
    pub fn description(&self) -> &'static str {
        match self {
            NameModification::PunctuationSplit => "Removed punctuations and text after the colon",
            NameModification::SeasonNumber => "Removed season numbers",
            NameModification::LeadingWords => "Take only 2 or 3 starting words",
        }
    }

    pub fn apply(&self, name: &str) -> Vec<String> {
        match self {
            NameModification::PunctuationSplit => punctuation_split(name),
            NameModification::SeasonNumber => season_number(name),
            NameModification::LeadingWords => leading_words(name),
        }
    }

    /// Applies the rule to every name and flattens the output, keeping the
    /// input order of the names.
    pub fn apply_all(&self, names: &[String]) -> Vec<String> {
        names.iter().flat_map(|name| self.apply(name)).collect()
    }
}

fn punctuation_split(name: &str) -> Vec<String> {
    let mut derived = Vec::new();

    let cleaned = PUNCTUATION.replace_all(name, "");
    if cleaned != name {
        derived.push(cleaned.into_owned());
    }

    if let Some((first_part, _)) = name.split_once(':') {
        derived.push(first_part.to_string());
    }

    if let Some((first_part, _)) = name.split_once(',') {
        derived.push(first_part.to_string());
    }

    derived
}

fn season_number(name: &str) -> Vec<String> {
    [&*SEASON_NUMBER, &*ORDINAL_SEASON]
        .into_iter()
        .filter_map(|re| {
            let cleaned = re.replace_all(name, "");
            (cleaned != name).then(|| cleaned.into_owned())
        })
        .collect()
}

fn leading_words(name: &str) -> Vec<String> {
    let words: Vec<&str> = name.split_whitespace().collect();

    [3, 2]
        .into_iter()
        .filter_map(|count| {
            let truncated = words.iter().take(count).copied().collect::<Vec<_>>().join(" ");
            (truncated != name).then_some(truncated)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_punctuation_split_colon() {
        assert_eq!(
            NameModification::PunctuationSplit.apply("Kimetsu no Yaiba: Katanakaji no Sato-hen"),
            vec!["Kimetsu no Yaiba Katanakaji no Satohen", "Kimetsu no Yaiba"]
        );
    }

    #[test]
    fn test_punctuation_split_first_colon_only() {
        let derived = NameModification::PunctuationSplit.apply("huehue: hue: hue");
        assert!(derived.contains(&"huehue".to_string()));
    }

    #[test]
    fn test_punctuation_split_comma() {
        assert_eq!(
            NameModification::PunctuationSplit
                .apply("Shin no Nakama ja Nai to Yuusha no Party wo Oidasareta node, Henkyou de Slow Life"),
            vec![
                "Shin no Nakama ja Nai to Yuusha no Party wo Oidasareta node Henkyou de Slow Life",
                "Shin no Nakama ja Nai to Yuusha no Party wo Oidasareta node",
            ]
        );
    }

    #[test]
    fn test_punctuation_split_apostrophe() {
        assert_eq!(
            NameModification::PunctuationSplit.apply("Hell's Paradise"),
            vec!["Hells Paradise"]
        );
    }

    #[test]
    fn test_punctuation_split_strips_combining_marks() {
        assert_eq!(
            NameModification::PunctuationSplit.apply("Poke\u{301}mon"),
            vec!["Pokemon"]
        );
        assert_eq!(
            NameModification::PunctuationSplit.apply("Kono Oto Tomare\u{203F}"),
            vec!["Kono Oto Tomare"]
        );
    }

    #[test]
    fn test_punctuation_split_keeps_underscore_and_non_latin() {
        assert_eq!(
            NameModification::PunctuationSplit.apply("天国大魔境_2023!"),
            vec!["天国大魔境_2023"]
        );
    }

    #[test]
    fn test_season_number_trailing() {
        assert_eq!(
            NameModification::SeasonNumber.apply("Vinland Saga Season 2"),
            vec!["Vinland Saga"]
        );
        assert_eq!(
            NameModification::SeasonNumber.apply("Dr. Stone STAGE 3"),
            vec!["Dr. Stone"]
        );
    }

    #[test]
    fn test_season_number_consumes_surrounding_whitespace() {
        assert_eq!(
            NameModification::SeasonNumber.apply("Mushoku Tensei Season 2 Part 2"),
            vec!["Mushoku TenseiPart 2"]
        );
    }

    #[test]
    fn test_season_number_ordinal() {
        assert_eq!(
            NameModification::SeasonNumber.apply("testeroni 95th season"),
            vec!["testeroni"]
        );
        assert_eq!(
            NameModification::SeasonNumber.apply("Kaguya-sama 2nd Season"),
            vec!["Kaguya-sama"]
        );
    }

    #[test]
    fn test_leading_words_longer_first() {
        assert_eq!(
            NameModification::LeadingWords.apply("Vinland Saga Season 2"),
            vec!["Vinland Saga Season", "Vinland Saga"]
        );
    }

    #[test]
    fn test_leading_words_three_word_name() {
        assert_eq!(
            NameModification::LeadingWords.apply("Boku no Hero"),
            vec!["Boku no"]
        );
    }

    #[test]
    fn test_plain_short_name_yields_nothing() {
        for name in ["Jigokuraku", "Tengoku Daimakyou", "Heavenly Delusion"] {
            for modification in MODIFICATIONS {
                assert!(
                    modification.apply(name).is_empty(),
                    "{modification:?} derived names from {name:?}"
                );
            }
        }
    }

    #[test]
    fn test_apply_all_keeps_name_order() {
        let names = vec!["Hell's Paradise".to_string(), "Oshi no Ko".to_string(), "Re:Zero".to_string()];
        assert_eq!(
            NameModification::PunctuationSplit.apply_all(&names),
            vec!["Hells Paradise", "ReZero", "Re"]
        );
    }
}
