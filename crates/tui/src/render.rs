use std::{fmt::Write as _, io::Write};

use anyhow::{Context, Result};
use clicker_core::{command::upgrade_letter, format_amount, Game};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

const TITLE: &str = "=== Terminal Clicker ===";

/// Build the full screen for the current game. Purchased upgrades are omitted.
pub fn render_frame(game: &Game, status: Option<&str>) -> String {
    let state = game.state();
    let catalog = game.catalog();
    let mut frame = String::new();

    let _ = writeln!(frame, "{TITLE}");
    let _ = writeln!(
        frame,
        "Points: {} ({}/s)",
        format_amount(state.points),
        format_amount(game.total_production())
    );
    let _ = writeln!(frame, "Total earned: {}", format_amount(state.total_points_earned));
    frame.push('\n');

    frame.push_str("Buildings:\n");
    for (index, (spec, building)) in catalog.buildings().iter().zip(&state.buildings).enumerate() {
        let _ = writeln!(
            frame,
            "  [{}] {} x{} | cost {} | producing {}/s",
            index + 1,
            spec.name,
            building.count,
            format_amount(game.building_cost(index)),
            format_amount(game.building_production(index))
        );
    }
    frame.push('\n');

    frame.push_str("Upgrades:\n");
    let mut any_available = false;
    for (index, (spec, building)) in catalog.buildings().iter().zip(&state.buildings).enumerate() {
        for (position, (upgrade, purchased)) in spec
            .upgrades
            .iter()
            .zip(&building.upgrades_purchased)
            .enumerate()
        {
            if *purchased {
                continue;
            }
            let Some(letter) = upgrade_letter(position) else {
                continue;
            };
            any_available = true;
            let _ = writeln!(
                frame,
                "  [{}{}] {} | cost {} | {}",
                index + 1,
                letter,
                upgrade.name,
                format_amount(upgrade.cost),
                upgrade.description
            );
        }
    }
    if !any_available {
        frame.push_str("  (all upgrades purchased)\n");
    }
    frame.push('\n');

    let _ = writeln!(frame, "{}", legend(game.catalog().len()));
    if let Some(message) = status {
        let _ = writeln!(frame, "{message}");
    }
    frame.push_str("> ");
    frame
}

fn legend(buildings: usize) -> String {
    let range = match buildings {
        0 => String::new(),
        1 => "1 = buy building | ".to_string(),
        n => format!("1-{n} = buy building | "),
    };
    format!("Commands: c = click | {range}1a, 1b, ... = buy upgrade | s = save | l = load | q = quit")
}

/// Clear the terminal and print the frame from the top-left corner.
pub fn draw<W: Write>(out: &mut W, frame: &str) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0)).context("failed to clear screen")?;
    out.write_all(frame.as_bytes())
        .context("failed to write frame")?;
    out.flush().context("failed to flush terminal")
}
