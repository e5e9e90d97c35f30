use crate::domain::model::{Character, CharacterDto, Roster};
use crate::utils::console::Console;
use crate::utils::error::Result;
use std::collections::HashSet;

const UNASSIGNED: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    pub listing_lines: usize,
    pub unique_count: usize,
    pub filtered: Vec<CharacterDto>,
    pub dtos: Vec<CharacterDto>,
}

/// All characters of the roster, unique by name and level.
pub fn unique_characters(roster: &Roster) -> HashSet<&Character> {
    roster.characters().collect()
}

/// Characters strictly above `min_level`, sorted by name.
pub fn filter_and_sort<'a>(characters: &HashSet<&'a Character>, min_level: i32) -> Vec<&'a Character> {
    let mut kept: Vec<&Character> = characters
        .iter()
        .copied()
        .filter(|c| c.level() > min_level)
        .collect();
    kept.sort_by(|a, b| a.name().cmp(b.name()));
    kept
}

pub fn to_dto(roster: &Roster, character: &Character) -> CharacterDto {
    CharacterDto {
        name: character.name().to_string(),
        level: character.level(),
        profession: roster
            .profession_name(character)
            .unwrap_or(UNASSIGNED)
            .to_string(),
    }
}

pub fn project(roster: &Roster, characters: &HashSet<&Character>) -> Vec<CharacterDto> {
    let mut dtos: Vec<CharacterDto> = characters.iter().map(|c| to_dto(roster, c)).collect();
    dtos.sort();
    dtos
}

/// Writes every profession followed by its characters; returns the line count.
pub fn write_listing(console: &Console, roster: &Roster) -> Result<usize> {
    let mut lines = 0;
    for profession in roster.professions() {
        console.line(format!(
            "Profession: {}, Base Armor: {}",
            profession.name(),
            profession.base_armor()
        ))?;
        lines += 1;
        for character in profession.characters() {
            console.line(format!(
                "\tCharacter: {}, Level: {}",
                character.name(),
                character.level()
            ))?;
            lines += 1;
        }
    }
    Ok(lines)
}

fn write_character(console: &Console, roster: &Roster, character: &Character) -> Result<()> {
    console.line(format!(
        "Character: {}, Level: {}, Profession: {}",
        character.name(),
        character.level(),
        roster.profession_name(character).unwrap_or(UNASSIGNED)
    ))
}

/// Runs the four report passes over `roster` and writes them to `console`.
pub fn write_report(console: &Console, roster: &Roster, min_level: i32) -> Result<ReportSummary> {
    let listing_lines = write_listing(console, roster)?;

    let unique = unique_characters(roster);
    console.blank()?;
    console.line("All Characters in Set:")?;
    for character in &unique {
        write_character(console, roster, character)?;
    }

    let kept = filter_and_sort(&unique, min_level);
    console.blank()?;
    console.line("Filtered and Sorted Characters:")?;
    for character in &kept {
        write_character(console, roster, character)?;
    }

    let dtos = project(roster, &unique);
    console.blank()?;
    console.line("Character DTO (sorted by name):")?;
    for dto in &dtos {
        console.line(format!(
            "CharacterDto: Name = {}, Level = {}, Profession = {}",
            dto.name, dto.level, dto.profession
        ))?;
    }

    tracing::debug!(
        "Report: {} unique characters, {} above level {}",
        unique.len(),
        kept.len(),
        min_level
    );

    Ok(ReportSummary {
        listing_lines,
        unique_count: unique.len(),
        filtered: kept.iter().map(|c| to_dto(roster, c)).collect(),
        dtos,
    })
}
