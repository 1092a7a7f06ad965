use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use clicker_core::{format_amount, Command, Game, LoadOutcome, Purchase, SaveManager, TickClock};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::render::{draw, render_frame};

const FAREWELL: &str = "Thanks for playing! Goodbye.";

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ClickerApp {
    game: Game,
    saves: SaveManager,
    tick_interval: Duration,
    status: Option<String>,
}

impl ClickerApp {
    pub fn new(game: Game, saves: SaveManager, tick_interval: Duration) -> Self {
        Self {
            game,
            saves,
            tick_interval,
            status: None,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Restore the last save, then interleave ticks and input lines until quit.
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.load();

        // Raw segments so a line with invalid UTF-8 is an unknown command, not a read error.
        let mut lines = input.split(b'\n');
        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut clock = TickClock::starting_at(Instant::now().into_std());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.handle_tick(clock.elapsed(Instant::now().into_std()));
                    self.redraw(&mut out)?;
                }
                segment = lines.next_segment() => {
                    let segment = segment.context("failed to read input")?;
                    let flow = match segment {
                        Some(bytes) => self.handle_line(&String::from_utf8_lossy(&bytes)),
                        None => {
                            info!("Input closed");
                            Flow::Quit
                        }
                    };
                    if flow == Flow::Quit {
                        break;
                    }
                    self.redraw(&mut out)?;
                }
            }
        }

        writeln!(out, "\n{FAREWELL}").context("failed to write farewell")?;
        out.flush().context("failed to flush terminal")?;
        info!(
            points = self.game.state().points,
            total = self.game.state().total_points_earned,
            "Session closed"
        );
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = Command::parse(line, self.game.catalog());
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Click => {
                self.game.click();
                self.set_status(format!(
                    "Click! +{}",
                    format_amount(self.game.state().click_power)
                ));
            }
            Command::BuyBuilding(index) => {
                let name = self.game.catalog().buildings()[index].name.clone();
                let outcome = self.game.buy_building(index);
                if let Purchase::Bought { cost } = outcome {
                    let count = self.game.state().buildings[index].count;
                    info!(building = %name, cost, count, "Building purchased");
                }
                self.set_status(purchase_message(&format!("a {name}"), outcome));
            }
            Command::BuyUpgrade { building, upgrade } => {
                let name = self.game.catalog().buildings()[building].upgrades[upgrade]
                    .name
                    .clone();
                let outcome = self.game.buy_upgrade(building, upgrade);
                if let Purchase::Bought { cost } = outcome {
                    info!(upgrade = %name, cost, "Upgrade purchased");
                }
                self.set_status(purchase_message(&name, outcome));
            }
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Quit => {
                info!("Quit requested");
                return Flow::Quit;
            }
            Command::Unknown(text) => {
                debug!(input = %text, "Unknown command");
                self.set_status(format!("Unknown command: {text:?}"));
            }
        }
        Flow::Continue
    }

    /// Advance production by a measured interval.
    pub fn handle_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
    }

    fn save(&mut self) {
        let (catalog, state) = self.game.split_mut();
        match self.saves.save(state, catalog) {
            Ok(entry) => {
                let at = entry.saved_at.with_timezone(&Local).format("%H:%M:%S");
                self.set_status(format!("Game saved to {} at {at}.", entry.path.display()));
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "Save failed");
                self.set_status(format!("Save failed: {err:#}"));
            }
        }
    }

    fn load(&mut self) {
        match self.saves.load(self.game.catalog()) {
            Ok(LoadOutcome::Loaded(state)) => {
                let saved = state
                    .last_saved
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S");
                self.game.replace_state(state);
                self.set_status(format!("Game loaded (saved {saved})."));
            }
            Ok(LoadOutcome::NotFound) => {
                self.set_status("No save found.".to_string());
            }
            Err(err) => {
                error!(
                    path = %self.saves.path().display(),
                    error = %err,
                    "Load failed; keeping current game"
                );
                self.set_status(format!("Load failed: {err}. Current game kept."));
            }
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    fn redraw<W: Write>(&self, out: &mut W) -> Result<()> {
        draw(out, &render_frame(&self.game, self.status()))
    }
}

fn purchase_message(item: &str, outcome: Purchase) -> String {
    match outcome {
        Purchase::Bought { cost } => {
            format!("Bought {item} for {} points.", format_amount(cost))
        }
        Purchase::InsufficientFunds { cost, points } => format!(
            "Not enough points for {item}: need {}, have {}.",
            format_amount(cost),
            format_amount(points)
        ),
        Purchase::AlreadyPurchased => format!("{item} is already purchased."),
    }
}
