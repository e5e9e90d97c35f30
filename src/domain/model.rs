use crate::utils::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Position of a [`Profession`] inside its [`Roster`].
///
/// Characters hold this instead of a pointer to their owner, so the
/// profession/character cycle never becomes an ownership cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ProfessionId(usize);

impl ProfessionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ProfessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profession {
    #[serde(skip)]
    id: ProfessionId,
    name: String,
    base_armor: u32,
    #[serde(default)]
    characters: Vec<Character>,
}

impl Profession {
    pub fn new(name: impl Into<String>, base_armor: u32) -> Self {
        Self {
            id: ProfessionId::default(),
            name: name.into(),
            base_armor,
            characters: Vec::new(),
        }
    }

    pub fn id(&self) -> ProfessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_armor(&self) -> u32 {
        self.base_armor
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Appends `character` and points its back-reference at this profession.
    ///
    /// A character already attached elsewhere is not detected.
    pub fn add_character(&mut self, mut character: Character) {
        character.profession = Some(self.id);
        self.characters.push(character);
    }

    fn relink(&mut self, id: ProfessionId) {
        self.id = id;
        for character in &mut self.characters {
            character.profession = Some(id);
        }
    }
}

// Characters are not part of a profession's equality.
impl PartialEq for Profession {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.base_armor == other.base_armor
    }
}

impl Eq for Profession {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    name: String,
    level: i32,
    #[serde(skip)]
    profession: Option<ProfessionId>,
}

impl Character {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
            profession: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn profession(&self) -> Option<ProfessionId> {
        self.profession
    }
}

// Equality and hashing ignore the back-reference: two characters with the same
// name and level are the same entry in a set even across professions.
impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.level == other.level
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.level.hash(state);
    }
}

/// Flat, owned view of a character for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterDto {
    pub name: String,
    pub level: i32,
    pub profession: String,
}

impl Ord for CharacterDto {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.level.cmp(&other.level))
            .then_with(|| self.profession.cmp(&other.profession))
    }
}

impl PartialOrd for CharacterDto {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Owner of the whole profession/character graph.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    professions: Vec<Profession>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from decoded professions, rebuilding ids and back-references.
    pub fn from_professions(professions: Vec<Profession>) -> Self {
        let mut roster = Self { professions };
        roster.relink();
        roster
    }

    pub fn push(&mut self, mut profession: Profession) -> ProfessionId {
        let id = ProfessionId(self.professions.len());
        profession.relink(id);
        self.professions.push(profession);
        id
    }

    pub fn add_character(&mut self, id: ProfessionId, character: Character) -> Result<()> {
        let profession =
            self.professions
                .get_mut(id.0)
                .ok_or_else(|| RosterError::ProcessingError {
                    message: format!("unknown profession {}", id),
                })?;
        profession.add_character(character);
        Ok(())
    }

    pub fn relink(&mut self) {
        for (index, profession) in self.professions.iter_mut().enumerate() {
            profession.relink(ProfessionId(index));
        }
    }

    pub fn professions(&self) -> &[Profession] {
        &self.professions
    }

    pub fn profession(&self, id: ProfessionId) -> Option<&Profession> {
        self.professions.get(id.0)
    }

    pub fn profession_of(&self, character: &Character) -> Option<&Profession> {
        character.profession.and_then(|id| self.profession(id))
    }

    pub fn profession_name(&self, character: &Character) -> Option<&str> {
        self.profession_of(character).map(Profession::name)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.professions.iter().flat_map(|p| p.characters.iter())
    }

    pub fn character_count(&self) -> usize {
        self.professions.iter().map(|p| p.characters.len()).sum()
    }

    /// Deep value comparison: professions, their characters in order, and
    /// back-reference ids. Object identity is not part of it.
    pub fn matches(&self, other: &Roster) -> bool {
        self.professions.len() == other.professions.len()
            && self
                .professions
                .iter()
                .zip(&other.professions)
                .all(|(a, b)| {
                    a == b
                        && a.id == b.id
                        && a.characters.len() == b.characters.len()
                        && a.characters.iter().zip(&b.characters).all(|(x, y)| {
                            x == y && x.profession == y.profession
                        })
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_character_sets_back_reference() {
        let mut roster = Roster::new();
        let warrior = roster.push(Profession::new("Warrior", 40));
        roster
            .add_character(warrior, Character::new("Hilda", 7))
            .unwrap();

        let profession = roster.profession(warrior).unwrap();
        assert_eq!(profession.characters().len(), 1);

        let hilda = &profession.characters()[0];
        assert_eq!(hilda.profession(), Some(warrior));
        assert_eq!(roster.profession_name(hilda), Some("Warrior"));
        assert_eq!(
            profession
                .characters()
                .iter()
                .filter(|c| c.name() == "Hilda")
                .count(),
            1
        );
    }

    #[test]
    fn test_add_character_unknown_profession() {
        let mut roster = Roster::new();
        let result = roster.add_character(ProfessionId(3), Character::new("Ghost", 1));
        assert!(matches!(result, Err(RosterError::ProcessingError { .. })));
    }

    #[test]
    fn test_push_relinks_prebuilt_profession() {
        let mut roster = Roster::new();
        roster.push(Profession::new("First", 1));

        let mut mage = Profession::new("Mage", 10);
        mage.add_character(Character::new("Merlin", 30));
        let id = roster.push(mage);

        assert_eq!(id.index(), 1);
        let merlin = &roster.profession(id).unwrap().characters()[0];
        assert_eq!(merlin.profession(), Some(id));
    }

    #[test]
    fn test_character_equality_ignores_profession() {
        let mut roster = Roster::new();
        let a = roster.push(Profession::new("A", 1));
        let b = roster.push(Profession::new("B", 2));
        roster.add_character(a, Character::new("Twin", 5)).unwrap();
        roster.add_character(b, Character::new("Twin", 5)).unwrap();

        let set: HashSet<&Character> = roster.characters().collect();
        assert_eq!(roster.character_count(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_dto_orders_by_name_first() {
        let mut dtos = vec![
            CharacterDto {
                name: "b".into(),
                level: 1,
                profession: "X".into(),
            },
            CharacterDto {
                name: "a".into(),
                level: 99,
                profession: "Y".into(),
            },
        ];
        dtos.sort();
        assert_eq!(dtos[0].name, "a");
    }

    #[test]
    fn test_matches_detects_value_change() {
        let mut left = Roster::new();
        let id = left.push(Profession::new("PA", 50));
        left.add_character(id, Character::new("A", 10)).unwrap();

        let right = left.clone();
        assert!(left.matches(&right));

        let mut changed = Roster::new();
        let id = changed.push(Profession::new("PA", 50));
        changed.add_character(id, Character::new("A", 11)).unwrap();
        assert!(!left.matches(&changed));
    }
}
