// The bracket is a complete binary tree packed into a 127-slot array: slot 0
// is the champion, children of slot i sit at 2i+1 and 2i+2, and slots 63..=126
// are the fixed round-of-64 matchup order. A slot is either blank or a team
// name; a pick reaches a slot only by being advanced from one of its children.
// This file holds the tree mutation primitives and the prediction scoring.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Total addressable slots in the tree.
pub const SLOT_COUNT: usize = 127;
/// First leaf slot; everything below this index is an internal game slot.
pub const FIRST_LEAF: usize = 63;
/// Number of round-of-64 participants.
pub const TEAM_COUNT: usize = 64;

/// Points awarded for a correct pick at the given slot. Leaf slots carry the
/// fixed seeding, not a prediction, and are worth nothing.
pub fn round_weight(slot: usize) -> u32 {
    match slot {
        0 => 32,           // champion
        1..=2 => 16,       // finalists
        3..=6 => 8,        // semifinalists
        7..=14 => 4,       // quarterfinalists
        15..=30 => 2,      // sweet sixteen
        31..=62 => 1,      // advancement out of the round of 64
        _ => 0,
    }
}

/// The maximum score a prediction can earn against any result:
/// 32 + 2*16 + 4*8 + 8*4 + 16*2 + 32*1.
pub const MAX_SCORE: u32 = 192;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bracket {
    /// Blank or a team name, per slot.
    slots: Vec<Option<String>>,
    /// Simulated points scored in each game slot. Only a result bracket
    /// carries these; they are recomputed per run and never persisted.
    #[serde(skip, default = "blank_scores")]
    team_scores: Vec<Option<u32>>,
    /// Present only on a saved user prediction.
    pub player_name: Option<String>,
    pub password: Option<String>,
}

fn blank_scores() -> Vec<Option<u32>> {
    vec![None; SLOT_COUNT]
}

impl PartialEq for Bracket {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Bracket {
    /// Builds a bracket whose leaves hold the given round-of-64 matchup order
    /// and whose 63 game slots are all blank. Anything other than exactly 64
    /// names is rejected; silently padding the leaves would break the rule
    /// that leaves are never blank.
    pub fn from_seeding(seeding: Vec<String>) -> Result<Bracket, Error> {
        if seeding.len() != TEAM_COUNT {
            return Err(Error::InvalidSeeding { got: seeding.len() });
        }
        let mut slots = vec![None; SLOT_COUNT];
        for (i, name) in seeding.into_iter().enumerate() {
            slots[FIRST_LEAF + i] = Some(name);
        }
        Ok(Bracket {
            slots,
            team_scores: blank_scores(),
            player_name: None,
            password: None,
        })
    }

    /// Deep copy of another bracket's picks. The copy mutates independently
    /// and starts with fresh transient scores and no owner.
    pub fn from_master(master: &Bracket) -> Bracket {
        Bracket {
            slots: master.slots.clone(),
            team_scores: blank_scores(),
            player_name: None,
            password: None,
        }
    }

    /// Copy of the master owned by a named player.
    pub fn for_player(master: &Bracket, player: &str) -> Bracket {
        let mut bracket = Bracket::from_master(master);
        bracket.player_name = Some(player.to_string());
        bracket
    }

    pub fn slot(&self, slot: usize) -> Option<&str> {
        self.slots[slot].as_deref()
    }

    /// Copies the team at `slot` into its parent, advancing it one round.
    /// No-op when the parent already holds that team. `slot` must be in
    /// 1..=126; the champion slot has no parent.
    pub fn advance(&mut self, slot: usize) {
        assert!(slot >= 1 && slot < SLOT_COUNT, "slot {} has no parent", slot);
        let parent = (slot - 1) / 2;
        if self.slots[parent] != self.slots[slot] {
            self.slots[parent] = self.slots[slot].clone();
        }
    }

    /// Clears `slot`, and first unwinds every later round the same pick was
    /// advanced into. Changing a pick can never leave a stale copy of it
    /// closer to the champion slot.
    pub fn undo_above(&mut self, slot: usize) {
        assert!(slot < SLOT_COUNT, "slot {} out of range", slot);
        if slot != 0 {
            let parent = (slot - 1) / 2;
            if self.slots[parent] == self.slots[slot] {
                self.undo_above(parent);
            }
        }
        self.slots[slot] = None;
    }

    /// Clears `root` and every internal slot underneath it; leaves keep the
    /// fixed seeding. Root 0 is special: it resets only slots 0..=6 (the
    /// champion, finalists and semifinalists), not the whole tree.
    pub fn reset_subtree(&mut self, root: usize) {
        assert!(root < FIRST_LEAF, "slot {} is not a game slot", root);
        if root == 0 {
            for slot in 0..7 {
                self.slots[slot] = None;
            }
            return;
        }
        let child1 = 2 * root + 1;
        let child2 = 2 * root + 2;
        if child1 < FIRST_LEAF {
            self.reset_subtree(child1);
        }
        if child2 < FIRST_LEAF {
            self.reset_subtree(child2);
        }
        self.slots[root] = None;
    }

    /// True once every one of the 127 slots holds a team.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    /// Compares this bracket's picks against a result bracket and sums the
    /// round weight of every matching game slot. Leaves are never scored.
    pub fn score_against(&self, result: &Bracket) -> u32 {
        (0..FIRST_LEAF)
            .filter(|&slot| self.slots[slot].is_some() && self.slots[slot] == result.slots[slot])
            .map(round_weight)
            .sum()
    }

    /// A bracket deserialized from storage must still hold the full 127-slot
    /// sequence before any slot index can be trusted.
    pub fn has_all_slots(&self) -> bool {
        self.slots.len() == SLOT_COUNT
    }

    /// Records the simulated points scored in `slot`'s game. Display detail
    /// only; scoring ignores it.
    pub fn set_team_score(&mut self, slot: usize, score: u32) {
        self.team_scores[slot] = Some(score);
    }

    pub fn team_score(&self, slot: usize) -> Option<u32> {
        self.team_scores[slot]
    }
}
