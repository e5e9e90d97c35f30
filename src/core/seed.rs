use crate::domain::model::{Character, Profession, Roster};
use crate::utils::error::Result;

/// Builds the fixed sample roster: PA(50) with A(10) and C(12), PB(30) with B(15).
pub fn sample_roster() -> Result<Roster> {
    let mut roster = Roster::new();
    let pa = roster.push(Profession::new("PA", 50));
    let pb = roster.push(Profession::new("PB", 30));

    roster.add_character(pa, Character::new("A", 10))?;
    roster.add_character(pb, Character::new("B", 15))?;
    roster.add_character(pa, Character::new("C", 12))?;

    tracing::debug!(
        "Seeded {} professions with {} characters",
        roster.professions().len(),
        roster.character_count()
    );
    Ok(roster)
}
