use std::fmt;

use frazeo_protocol::{Case, CaseSet};
use serde::{Deserialize, Serialize};

use crate::pattern::{Atom, PatternDefinition};
use crate::tags::PhraseTag::{self, Adjective as ADJ, Adverb as ADV, Noun as N, Preposition as PREP};

/// Grammatical type of an extracted phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    SingleWord,
    Adjectival,
    Genitive,
    AdjectivalWordy,
    GenitiveWordy,
    AdjectivalGenitive,
    GenitiveAdjectival,
    // Not informative as named entities; only in the extended registry
    Adverbial,
    AdjectivalWithPreposition,
    GenitiveWithPreposition,
    AdverbialCombination,
    SubstantiveWithPreposition,
}

impl PatternType {
    pub fn label(self) -> &'static str {
        match self {
            PatternType::SingleWord => "однословное",
            PatternType::Adjectival => "адъективное",
            PatternType::Genitive => "генитивное",
            PatternType::AdjectivalWordy => "адъективное_многословное",
            PatternType::GenitiveWordy => "генитивное_многословное",
            PatternType::AdjectivalGenitive => "адъективно-генитивное",
            PatternType::GenitiveAdjectival => "генитивно-адъективное",
            PatternType::Adverbial => "адвербиальное",
            PatternType::AdjectivalWithPreposition => "адъективное_с_предлогом",
            PatternType::GenitiveWithPreposition => "генитивное_с_предлогом",
            PatternType::AdverbialCombination => "адвербиальное_сочетание",
            PatternType::SubstantiveWithPreposition => "субстантивное_с_предлогом",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PatternType::SingleWord => "Сущ",
            PatternType::Adjectival => "Прил + Сущ",
            PatternType::Genitive => "Сущ + Сущ",
            PatternType::AdjectivalWordy => "Прил + Прил + Сущ",
            PatternType::GenitiveWordy => "Сущ + Сущ + Сущ",
            PatternType::AdjectivalGenitive => "Сущ + Прил + Сущ",
            PatternType::GenitiveAdjectival => "Прил + Сущ + Сущ",
            PatternType::Adverbial => "Нар + Прил",
            PatternType::AdjectivalWithPreposition => "Предл + Прил + Сущ",
            PatternType::GenitiveWithPreposition => "Предл + Сущ + Сущ",
            PatternType::AdverbialCombination => "Нар + (Прил + Сущ)",
            PatternType::SubstantiveWithPreposition => "Сущ + Предл + Сущ",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            PatternType::SingleWord => "blue",
            PatternType::Adjectival => "green",
            PatternType::Genitive => "yellow",
            PatternType::AdjectivalWordy => "lightgreen",
            PatternType::GenitiveWordy => "lightyellow",
            PatternType::AdjectivalGenitive => "lightblue",
            PatternType::GenitiveAdjectival => "lightpurple",
            PatternType::Adverbial
            | PatternType::AdjectivalWithPreposition
            | PatternType::GenitiveWithPreposition
            | PatternType::AdverbialCombination
            | PatternType::SubstantiveWithPreposition => "gray",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub kind: PatternType,
    pub definitions: Vec<PatternDefinition>,
}

/// Ordered rule table. Earlier rules take precedence when several match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, kind: PatternType, definitions: Vec<PatternDefinition>) -> Self {
        self.rules.push(PatternRule { kind, definitions });
        self
    }

    /// The informative phrase types.
    pub fn standard() -> Self {
        Self::new()
            .register(PatternType::SingleWord, vec![PatternDefinition::tags(&[N])])
            .register(PatternType::Adjectival, vec![PatternDefinition::tags(&[ADJ, N])])
            .register(
                PatternType::Genitive,
                vec![PatternDefinition::tags(&[N, N])
                    .with_case(0, CaseSet::GENITIVE)
                    .with_case(1, CaseSet::NOMINATIVE | CaseSet::ACCUSATIVE)],
            )
            .register(PatternType::AdjectivalWordy, vec![PatternDefinition::tags(&[ADJ, ADJ, N])])
            .register(PatternType::GenitiveWordy, vec![PatternDefinition::tags(&[N, N, N])])
            .register(PatternType::AdjectivalGenitive, vec![PatternDefinition::tags(&[N, ADJ, N])])
            .register(PatternType::GenitiveAdjectival, vec![PatternDefinition::tags(&[ADJ, N, N])])
    }

    /// [`standard`](Self::standard) plus the prepositional and adverbial types.
    pub fn extended() -> Self {
        let adj_noun = || Atom::Group(vec![Atom::Tag(ADJ), Atom::Tag(N)]);

        Self::standard()
            .register(PatternType::Adverbial, vec![PatternDefinition::tags(&[ADV, ADJ])])
            .register(
                PatternType::AdjectivalWithPreposition,
                vec![PatternDefinition::tags(&[PREP, ADJ, N])],
            )
            .register(
                PatternType::GenitiveWithPreposition,
                vec![PatternDefinition::tags(&[PREP, N, N])],
            )
            .register(
                PatternType::AdverbialCombination,
                vec![
                    PatternDefinition::new(vec![Atom::Tag(ADV), adj_noun(), Atom::Any]),
                    PatternDefinition::new(vec![Atom::Tag(ADV), adj_noun(), Atom::Any, Atom::Any]),
                ],
            )
            .register(
                PatternType::SubstantiveWithPreposition,
                vec![PatternDefinition::tags(&[N, PREP, N])],
            )
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn rule(&self, kind: PatternType) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    /// Registration position of `kind`; earlier rules take precedence.
    pub fn precedence(&self, kind: PatternType) -> Option<usize> {
        self.rules.iter().position(|r| r.kind == kind)
    }

    /// First rule (in registration order) with a matching definition.
    pub fn classify_tags(&self, tags: &[PhraseTag], cases: &[Option<Case>]) -> Option<PatternType> {
        if tags.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| rule.definitions.iter().any(|def| def.matches(tags, cases)))
            .map(|rule| rule.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOM: Option<Case> = Some(Case::Nominative);
    const GEN: Option<Case> = Some(Case::Genitive);

    #[test]
    fn test_single_noun_length_must_match() {
        let single = PatternRegistry::new().register(PatternType::SingleWord, vec![PatternDefinition::tags(&[N])]);
        let adjectival = PatternRegistry::new().register(PatternType::Adjectival, vec![PatternDefinition::tags(&[ADJ, N])]);

        assert_eq!(single.classify_tags(&[N], &[NOM]), Some(PatternType::SingleWord));
        assert_eq!(adjectival.classify_tags(&[N], &[NOM]), None);
    }

    #[test]
    fn test_precedence_follows_registration() {
        let registry = PatternRegistry::standard();

        assert_eq!(registry.precedence(PatternType::SingleWord), Some(0));
        assert_eq!(registry.precedence(PatternType::Genitive), Some(2));
        assert_eq!(registry.precedence(PatternType::Adverbial), None);
    }

    #[test]
    fn test_genitive_requires_cases() {
        let registry = PatternRegistry::standard();

        assert_eq!(registry.classify_tags(&[N, N], &[GEN, NOM]), Some(PatternType::Genitive));
        assert_eq!(registry.classify_tags(&[N, N], &[NOM, NOM]), None);
    }

    #[test]
    fn test_standard_sequences() {
        let registry = PatternRegistry::standard();
        let none = [None, None, None];

        assert_eq!(registry.classify_tags(&[ADJ, N], &none[..2]), Some(PatternType::Adjectival));
        assert_eq!(registry.classify_tags(&[ADJ, ADJ, N], &none), Some(PatternType::AdjectivalWordy));
        assert_eq!(registry.classify_tags(&[N, N, N], &none), Some(PatternType::GenitiveWordy));
        assert_eq!(registry.classify_tags(&[N, ADJ, N], &none), Some(PatternType::AdjectivalGenitive));
        assert_eq!(registry.classify_tags(&[ADJ, N, N], &none), Some(PatternType::GenitiveAdjectival));
        assert_eq!(registry.classify_tags(&[PREP, ADJ, N], &none), None);
        assert_eq!(registry.classify_tags(&[], &[]), None);
    }

    #[test]
    fn test_extended_sequences() {
        let registry = PatternRegistry::extended();
        let none = [None, None, None, None];

        assert_eq!(registry.classify_tags(&[ADV, ADJ], &none[..2]), Some(PatternType::Adverbial));
        assert_eq!(registry.classify_tags(&[PREP, ADJ, N], &none[..3]), Some(PatternType::AdjectivalWithPreposition));
        assert_eq!(registry.classify_tags(&[PREP, N, N], &none[..3]), Some(PatternType::GenitiveWithPreposition));
        assert_eq!(registry.classify_tags(&[N, PREP, N], &none[..3]), Some(PatternType::SubstantiveWithPreposition));
        assert_eq!(registry.classify_tags(&[ADV, ADJ, N], &none[..3]), Some(PatternType::AdverbialCombination));
        assert_eq!(
            registry.classify_tags(&[ADV, PREP, ADJ, N], &none),
            Some(PatternType::AdverbialCombination)
        );
    }

    #[test]
    fn test_registration_order_wins() {
        let registry = PatternRegistry::new()
            .register(PatternType::GenitiveWordy, vec![PatternDefinition::new(vec![Atom::Any, Atom::Any])])
            .register(PatternType::Adjectival, vec![PatternDefinition::tags(&[ADJ, N])]);

        assert_eq!(registry.classify_tags(&[ADJ, N], &[None, None]), Some(PatternType::GenitiveWordy));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(PatternType::Adjectival.to_string(), "адъективное");
        assert_eq!(PatternType::Genitive.description(), "Сущ + Сущ");
        assert_eq!(PatternType::SingleWord.color(), "blue");
        assert!(PatternRegistry::standard().rule(PatternType::Adverbial).is_none());
        assert_eq!(PatternRegistry::extended().rules().len(), 12);
    }
}
