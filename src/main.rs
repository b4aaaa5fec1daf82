mod bracket;
mod config;
mod error;
mod ingest;
mod sim;
mod store;

use std::path::Path;

use anyhow::Context;
use rayon::prelude::*;

use crate::bracket::Bracket;

fn main() -> anyhow::Result<()> {
    let config = config::Config::load_or_default(std::env::args().nth(1).as_deref());

    let info = ingest::TournamentInfo::load(Path::new(&config.teams_file))
        .context("loading team info")?;
    let seeding =
        ingest::load_seeding(Path::new(&config.seeding_file)).context("loading seeding")?;
    let master = Bracket::from_seeding(seeding)?;

    // Play the tournament out once; this result is the ground truth every
    // prediction is scored against.
    let mut result = Bracket::from_master(&master);
    sim::simulate(&info, &mut result)?;

    let champion = result.slot(0).context("simulation left no champion")?;
    println!("Champion: {}", champion);
    if let Some(team) = info.get_team(champion) {
        println!("  {} ({}), ranked {}", team.nickname, team.info, team.ranking);
    }
    if let (Some(s1), Some(s2)) = (result.team_score(1), result.team_score(2)) {
        println!("  Final: {} - {}", s1, s2);
    }

    // Score every saved prediction against the simulated result.
    let (saved, failures) = store::load_all(Path::new(&config.saves_dir));
    for err in &failures {
        eprintln!("Warning: {}", err);
    }
    if !saved.is_empty() {
        let mut standings: Vec<(String, u32)> = saved
            .par_iter()
            .map(|prediction| {
                let player = prediction
                    .player_name
                    .clone()
                    .unwrap_or_else(|| "<unnamed>".to_string());
                (player, prediction.score_against(&result))
            })
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        println!("\nScoreboard");
        for (player, score) in &standings {
            println!("{:>4}  {}", score, player);
        }
    }

    // How likely was that champion? Tally many independent playouts.
    let odds = sim::championship_odds(&info, &master, config.odds_runs)?;
    println!("\nChampionship odds over {} simulations", config.odds_runs);
    for (name, share) in odds.iter().take(10) {
        println!("{:>6.2}%  {}", share * 100.0, name);
    }

    Ok(())
}
