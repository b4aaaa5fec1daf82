// Plays out the tournament. Every one of the 63 games gets a rank-weighted
// random score per side; the higher score advances. Games run from slot 62
// down to slot 0, so both participants of a game are always decided before
// the game itself is played.

use std::cmp::Ordering;

use fnv::FnvHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;

use crate::bracket::{Bracket, FIRST_LEAF};
use crate::error::Error;
use crate::ingest::{Team, TournamentInfo};

/// Fills every game slot of `target`, which must carry a seeded round of 64.
/// Both sides' simulated points are recorded on the bracket as transient
/// per-slot detail.
pub fn simulate(info: &TournamentInfo, target: &mut Bracket) -> Result<(), Error> {
    let mut rng = rand::thread_rng();

    for game in (0..FIRST_LEAF).rev() {
        let child1 = 2 * game + 1;
        let child2 = 2 * game + 2;
        let ranking1 = resolve(info, target, child1)?.ranking;
        let ranking2 = resolve(info, target, child2)?.ranking;

        // Redraw both sides on a tie; a tournament game has no draws.
        let mut score1 = 0;
        let mut score2 = 0;
        while score1 == score2 {
            score1 = game_score(&mut rng, ranking1);
            score2 = game_score(&mut rng, ranking2);
        }

        target.set_team_score(child1, score1);
        target.set_team_score(child2, score2);

        if score1 > score2 {
            target.advance(child1);
        } else {
            target.advance(child2);
        }
    }

    Ok(())
}

/// One side's score for one game: `trunc((uniform(0,61) * w + 75) * w)` with
/// `w = 0.7 + ranking * 0.02`. The arithmetic, including the truncation, is
/// kept exactly as the scoring model defines it.
pub(crate) fn game_score<R: Rng>(rng: &mut R, ranking: u32) -> u32 {
    let weight = 0.7 + ranking as f64 * 0.02;
    ((rng.gen::<f64>() * 61.0 * weight + 75.0) * weight) as u32
}

fn resolve<'a>(
    info: &'a TournamentInfo,
    bracket: &Bracket,
    slot: usize,
) -> Result<&'a Team, Error> {
    let name = bracket.slot(slot).ok_or(Error::EmptySlot { slot })?;
    info.get_team(name).ok_or_else(|| Error::UnknownTeam {
        name: name.to_string(),
    })
}

/// Runs `runs` independent simulations of the master bracket and tallies how
/// often each team takes the championship, sorted by share descending.
pub fn championship_odds(
    info: &TournamentInfo,
    master: &Bracket,
    runs: usize,
) -> Result<Vec<(String, f64)>, Error> {
    assert!(runs > 0, "at least one simulation run is required");

    let progress = ProgressBar::new(runs as u64);
    progress.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} simulations"));

    let per_core = (runs / num_cpus::get().max(1)).max(1);
    let champions = (0..runs)
        .into_par_iter()
        .with_min_len(per_core)
        .map(|_| {
            let mut result = Bracket::from_master(master);
            simulate(info, &mut result)?;
            progress.inc(1);
            let champion = result.slot(0).ok_or(Error::EmptySlot { slot: 0 })?;
            Ok(champion.to_string())
        })
        .collect::<Result<Vec<String>, Error>>()?;
    progress.finish_and_clear();

    let mut counts: FnvHashMap<String, usize> = FnvHashMap::default();
    for champion in champions {
        *counts.entry(champion).or_insert(0) += 1;
    }

    let mut odds: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(name, wins)| (name, wins as f64 / runs as f64))
        .collect();
    odds.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(odds)
}
