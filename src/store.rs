// Saved prediction records: one JSON file per player in a saves directory,
// named after the player. All records are read back at startup; a record
// that fails to parse is reported and skipped so one corrupt file cannot
// take down everyone else's saves.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bracket::Bracket;
use crate::error::Error;

/// Writes the bracket to `<dir>/<player>.json`. The write goes through a
/// temp file and a rename so a crash cannot leave a half-written record.
/// Transient per-slot scores never reach the file.
pub fn save(dir: &Path, bracket: &Bracket) -> Result<PathBuf, Error> {
    let player = bracket.player_name.as_deref().ok_or_else(|| Error::Persistence {
        path: dir.to_path_buf(),
        msg: "bracket has no owner".to_string(),
    })?;

    fs::create_dir_all(dir).map_err(|e| Error::Persistence {
        path: dir.to_path_buf(),
        msg: e.to_string(),
    })?;

    let path = dir.join(format!("{}.json", player));
    let json = serde_json::to_string_pretty(bracket).map_err(|e| Error::Persistence {
        path: path.clone(),
        msg: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .and_then(|_| fs::rename(&tmp, &path))
        .map_err(|e| Error::Persistence {
            path: path.clone(),
            msg: e.to_string(),
        })?;

    Ok(path)
}

/// Loads every `.json` record under `dir`. Unreadable records come back as
/// errors alongside the brackets that did load; a missing directory simply
/// means no one has saved yet.
pub fn load_all(dir: &Path) -> (Vec<Bracket>, Vec<Error>) {
    let mut loaded = Vec::new();
    let mut failures = Vec::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return (loaded, failures),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match load_one(&path) {
            Ok(bracket) => loaded.push(bracket),
            Err(err) => failures.push(err),
        }
    }

    (loaded, failures)
}

fn load_one(path: &Path) -> Result<Bracket, Error> {
    let raw = fs::read_to_string(path).map_err(|e| Error::Persistence {
        path: path.to_path_buf(),
        msg: e.to_string(),
    })?;
    let bracket: Bracket = serde_json::from_str(&raw).map_err(|e| Error::Persistence {
        path: path.to_path_buf(),
        msg: e.to_string(),
    })?;
    if !bracket.has_all_slots() {
        return Err(Error::Persistence {
            path: path.to_path_buf(),
            msg: "record does not hold the full 127-slot sequence".to_string(),
        });
    }
    Ok(bracket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::SLOT_COUNT;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("madness-{}-{}", label, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn saved_bracket(player: &str) -> Bracket {
        let seeding = (1..=64).map(|i| format!("Team {:02}", i)).collect();
        let master = Bracket::from_seeding(seeding).unwrap();
        let mut bracket = Bracket::for_player(&master, player);
        bracket.password = Some("hunter2".to_string());
        for slot in (1..SLOT_COUNT).rev() {
            bracket.advance(slot);
        }
        bracket
    }

    #[test]
    fn save_then_load_round_trips_picks_and_owner() {
        let dir = scratch_dir("roundtrip");
        let mut bracket = saved_bracket("alice");
        bracket.set_team_score(1, 90); // transient, must not survive

        let path = save(&dir, &bracket).unwrap();
        assert_eq!(path.file_name().unwrap(), "alice.json");

        let (loaded, failures) = load_all(&dir);
        assert!(failures.is_empty());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], bracket);
        assert_eq!(loaded[0].player_name.as_deref(), Some("alice"));
        assert_eq!(loaded[0].password.as_deref(), Some("hunter2"));
        assert_eq!(loaded[0].team_score(1), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ownerless_bracket_cannot_be_saved() {
        let dir = scratch_dir("ownerless");
        let seeding = (1..=64).map(|i| format!("Team {:02}", i)).collect();
        let master = Bracket::from_seeding(seeding).unwrap();
        let err = save(&dir, &master).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }), "{err}");
    }

    #[test]
    fn corrupt_record_is_skipped_and_reported() {
        let dir = scratch_dir("corrupt");
        save(&dir, &saved_bracket("alice")).unwrap();
        save(&dir, &saved_bracket("bob")).unwrap();
        fs::write(dir.join("mallory.json"), "not a bracket").unwrap();
        fs::write(
            dir.join("trent.json"),
            r#"{"slots": [null, null], "player_name": "trent", "password": null}"#,
        )
        .unwrap();

        let (loaded, failures) = load_all(&dir);
        assert_eq!(loaded.len(), 2);
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().any(|e| e.to_string().contains("mallory")));
        assert!(failures.iter().any(|e| e.to_string().contains("trent")));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_means_no_saves() {
        let dir = scratch_dir("missing");
        let (loaded, failures) = load_all(&dir);
        assert!(loaded.is_empty());
        assert!(failures.is_empty());
    }
}
