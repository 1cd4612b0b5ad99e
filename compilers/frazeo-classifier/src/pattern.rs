use frazeo_protocol::{Case, CaseSet};

use crate::tags::PhraseTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Tag(PhraseTag),
    /// Matches any tag, including [`PhraseTag::Unknown`]
    Any,
    /// A short tag run that must occur contiguously somewhere between this
    /// atom's position and the end of the phrase. Occupies one position.
    Group(Vec<Atom>),
}

impl Atom {
    fn accepts(&self, tag: PhraseTag) -> bool {
        match self {
            Atom::Tag(expected) => *expected == tag && tag != PhraseTag::Unknown,
            Atom::Any => true,
            Atom::Group(_) => false,
        }
    }
}

/// The word at `position` must carry one of `cases`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseConstraint {
    pub position: usize,
    pub cases: CaseSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDefinition {
    pub atoms: Vec<Atom>,
    pub cases: Vec<CaseConstraint>,
}

impl PatternDefinition {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms, cases: Vec::new() }
    }

    /// A plain tag sequence.
    pub fn tags(tags: &[PhraseTag]) -> Self {
        Self::new(tags.iter().copied().map(Atom::Tag).collect())
    }

    pub fn with_case(mut self, position: usize, cases: CaseSet) -> Self {
        self.cases.push(CaseConstraint { position, cases });
        self
    }

    /// Tag-level match. Groups are checked independently of each other, so two
    /// groups may be satisfied by the same span.
    pub fn matches_tags(&self, tags: &[PhraseTag]) -> bool {
        if tags.is_empty() || tags.len() != self.atoms.len() {
            return false;
        }

        self.atoms.iter().enumerate().all(|(i, atom)| match atom {
            Atom::Group(inner) => group_occurs(inner, &tags[i..]),
            _ => atom.accepts(tags[i]),
        })
    }

    pub fn matches_cases(&self, cases: &[Option<Case>]) -> bool {
        self.cases.iter().all(|constraint| {
            cases
                .get(constraint.position)
                .map_or(false, |case| constraint.cases.admits(*case))
        })
    }

    /// Case constraints are only consulted once the tags line up.
    pub fn matches(&self, tags: &[PhraseTag], cases: &[Option<Case>]) -> bool {
        self.matches_tags(tags) && self.matches_cases(cases)
    }
}

fn group_occurs(inner: &[Atom], window: &[PhraseTag]) -> bool {
    if inner.is_empty() {
        return false;
    }

    window
        .windows(inner.len())
        .any(|span| inner.iter().zip(span).all(|(atom, tag)| atom.accepts(*tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::PhraseTag::{Adjective as ADJ, Adverb as ADV, Noun as N, Preposition as PREP, Unknown as UNK};

    fn group(tags: &[PhraseTag]) -> Atom {
        Atom::Group(tags.iter().copied().map(Atom::Tag).collect())
    }

    #[test]
    fn test_fixed_sequence() {
        let def = PatternDefinition::tags(&[ADJ, N]);

        assert!(def.matches_tags(&[ADJ, N]));
        assert!(!def.matches_tags(&[N, ADJ]));
        assert!(!def.matches_tags(&[ADJ, N, N]));
        assert!(!def.matches_tags(&[]));
    }

    #[test]
    fn test_wildcard_and_unknown() {
        let def = PatternDefinition::new(vec![Atom::Any, Atom::Tag(N)]);
        assert!(def.matches_tags(&[UNK, N]));
        assert!(def.matches_tags(&[PREP, N]));

        // A literal never accepts an untagged word, even an `Unknown` literal
        let literal_unknown = PatternDefinition::tags(&[UNK]);
        assert!(!literal_unknown.matches_tags(&[UNK]));
    }

    #[test]
    fn test_group_floats_right() {
        let def = PatternDefinition::new(vec![Atom::Tag(ADV), group(&[ADJ, N]), Atom::Any, Atom::Any]);

        assert!(def.matches_tags(&[ADV, ADJ, N, PREP]));
        assert!(def.matches_tags(&[ADV, PREP, ADJ, N]));
        assert!(!def.matches_tags(&[ADV, N, ADJ, PREP]));
    }

    #[test]
    fn test_group_never_looks_left() {
        let def = PatternDefinition::new(vec![Atom::Any, group(&[ADJ])]);

        assert!(def.matches_tags(&[N, ADJ]));
        assert!(!def.matches_tags(&[ADJ, N]));
    }

    #[test]
    fn test_leading_group_searches_whole_phrase() {
        let def = PatternDefinition::new(vec![group(&[ADJ]), Atom::Any]);

        // The group is satisfied by position 1 although it sits at position 0
        assert!(def.matches_tags(&[N, ADJ]));
        assert!(!def.matches_tags(&[N, N]));
    }

    #[test]
    fn test_group_longer_than_window() {
        let def = PatternDefinition::new(vec![Atom::Any, group(&[ADJ, N])]);
        assert!(!def.matches_tags(&[ADJ, N]));
    }

    #[test]
    fn test_two_groups_are_independent() {
        let def = PatternDefinition::new(vec![group(&[N]), group(&[N])]);

        // Both groups are satisfied by the noun at position 1
        assert!(def.matches_tags(&[ADJ, N]));
        assert!(!def.matches_tags(&[N, ADJ]));
    }

    #[test]
    fn test_empty_group_never_matches() {
        let def = PatternDefinition::new(vec![Atom::Group(vec![])]);
        assert!(!def.matches_tags(&[N]));
    }

    #[test]
    fn test_case_constraints() {
        let def = PatternDefinition::tags(&[N, N])
            .with_case(0, CaseSet::GENITIVE)
            .with_case(1, CaseSet::NOMINATIVE | CaseSet::ACCUSATIVE);

        assert!(def.matches(&[N, N], &[Some(Case::Genitive), Some(Case::Nominative)]));
        assert!(def.matches(&[N, N], &[Some(Case::Genitive), Some(Case::Accusative)]));
        assert!(!def.matches(&[N, N], &[Some(Case::Nominative), Some(Case::Nominative)]));
        assert!(!def.matches(&[N, N], &[Some(Case::Genitive), None]));
        assert!(!def.matches(&[N, ADJ], &[Some(Case::Genitive), Some(Case::Nominative)]));
    }
}
