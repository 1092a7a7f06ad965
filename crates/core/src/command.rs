//! Text commands accepted at the prompt.

use crate::models::Catalog;

/// A parsed line of player input. Indices are zero-based and valid for the
/// catalog the command was parsed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `c`
    Click,
    /// `1`, `2`, ...
    BuyBuilding(usize),
    /// `1a`, `2b`, ...
    BuyUpgrade {
        /// Building index.
        building: usize,
        /// Upgrade position within the building.
        upgrade: usize,
    },
    /// `s`
    Save,
    /// `l`
    Load,
    /// `q`
    Quit,
    /// Anything else, as typed (trimmed).
    Unknown(String),
}

impl Command {
    /// Parse one input line. Never fails; unrecognised input becomes [`Command::Unknown`].
    pub fn parse(line: &str, catalog: &Catalog) -> Self {
        let trimmed = line.trim();
        let normalized = trimmed.to_lowercase();
        match normalized.as_str() {
            "c" => Command::Click,
            "s" => Command::Save,
            "l" => Command::Load,
            "q" => Command::Quit,
            other => parse_purchase(other, catalog)
                .unwrap_or_else(|| Command::Unknown(trimmed.to_string())),
        }
    }
}

fn parse_purchase(input: &str, catalog: &Catalog) -> Option<Command> {
    let digits_end = input
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    if digits_end == 0 {
        return None;
    }
    let (digits, suffix) = input.split_at(digits_end);
    let number = digits.parse::<usize>().ok()?;
    let building = number.checked_sub(1)?;
    let spec = catalog.building(building)?;

    let mut letters = suffix.chars();
    match (letters.next(), letters.next()) {
        (None, _) => Some(Command::BuyBuilding(building)),
        (Some(letter), None) => {
            let upgrade = upgrade_index(letter)?;
            if upgrade < spec.upgrades.len() {
                Some(Command::BuyUpgrade { building, upgrade })
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Map `a`, `b`, ... to 0, 1, ...
pub fn upgrade_index(letter: char) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some(usize::from(letter as u8 - b'a'))
    } else {
        None
    }
}

/// Inverse of [`upgrade_index`]; positions past `z` have no letter.
pub fn upgrade_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|idx| *idx < 26)
        .map(|idx| char::from(b'a' + idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line, &Catalog::default())
    }

    #[test]
    fn single_letter_commands() {
        assert_eq!(parse("c"), Command::Click);
        assert_eq!(parse("  S \n"), Command::Save);
        assert_eq!(parse("L"), Command::Load);
        assert_eq!(parse("q"), Command::Quit);
    }

    #[test]
    fn building_commands_are_one_based() {
        assert_eq!(parse("1"), Command::BuyBuilding(0));
        assert_eq!(parse("3"), Command::BuyBuilding(2));
    }

    #[test]
    fn upgrade_commands_combine_building_and_letter() {
        assert_eq!(
            parse("1a"),
            Command::BuyUpgrade {
                building: 0,
                upgrade: 0
            }
        );
        assert_eq!(
            parse("3B"),
            Command::BuyUpgrade {
                building: 2,
                upgrade: 1
            }
        );
    }

    #[test]
    fn out_of_range_and_malformed_input_is_unknown() {
        for input in ["0", "4", "1c", "4a", "a1", "1ab", "", "cc", "-1", "hello"] {
            assert_eq!(
                parse(input),
                Command::Unknown(input.to_string()),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn letters_round_trip() {
        assert_eq!(upgrade_index('a'), Some(0));
        assert_eq!(upgrade_index('b'), Some(1));
        assert_eq!(upgrade_letter(1), Some('b'));
        assert_eq!(upgrade_letter(26), None);
        assert_eq!(upgrade_index('1'), None);
    }
}
