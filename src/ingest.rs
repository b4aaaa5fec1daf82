// This file ingests the static tournament data: the team info records and the
// initial round-of-64 matchup order. Both sources are plain line-oriented
// text. Teams live in a map keyed by name for the rest of the process.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub nickname: String,
    /// A brief free-text description of the team.
    pub info: String,
    /// 1-16 within its region, lower is stronger. Drives the simulation.
    pub ranking: u32,
    /// Points per game scored. Informational only.
    pub offense_ppg: f64,
    /// Points per game allowed. Informational only.
    pub defense_ppg: f64,
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Immutable registry of the 64 participants, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TournamentInfo {
    teams: FnvHashMap<String, Team>,
}

impl TournamentInfo {
    pub fn load(path: &Path) -> Result<TournamentInfo, Error> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        TournamentInfo::from_reader(BufReader::new(file))
    }

    /// Parses six-line team records (name, nickname, info, ranking, offense
    /// ppg, defense ppg) separated by one blank line. A duplicate name
    /// overwrites the earlier record; the last one wins.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<TournamentInfo, Error> {
        let lines = read_lines(reader)?;
        let mut teams: FnvHashMap<String, Team> = FnvHashMap::default();

        let mut i = 0;
        while i < lines.len() {
            let record = &lines[i..];
            if record.iter().all(|l| l.trim().is_empty()) {
                break; // trailing blank lines after the last record
            }
            if record.len() < 6 {
                return Err(Error::DataFormat {
                    line: i + 1,
                    msg: format!("truncated team record ({} of 6 lines)", record.len()),
                });
            }

            let team = Team {
                name: record[0].clone(),
                nickname: record[1].clone(),
                info: record[2].clone(),
                ranking: parse_field(&record[3], i + 4, "ranking")?,
                offense_ppg: parse_field(&record[4], i + 5, "offense ppg")?,
                defense_ppg: parse_field(&record[5], i + 6, "defense ppg")?,
            };
            teams.insert(team.name.clone(), team);

            i += 7; // six fields plus the blank separator
        }

        Ok(TournamentInfo { teams })
    }

    /// Exact-match lookup. Callers must tolerate a miss because bracket
    /// slots can be blank or hold a name that never loaded.
    pub fn get_team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Reads the initial matchup order: one team name per line, top of the
/// bracket first, mapping onto leaf slots 63..=126 in order.
pub fn load_seeding(path: &Path) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    seeding_from_reader(BufReader::new(file))
}

pub fn seeding_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>, Error> {
    let lines = read_lines(reader)?;
    Ok(lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect())
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, Error> {
    reader
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(|source| Error::Io {
            path: "<stream>".into(),
            source,
        })
}

fn parse_field<T: FromStr>(raw: &str, line: usize, field: &str) -> Result<T, Error> {
    raw.trim().parse().map_err(|_| Error::DataFormat {
        line,
        msg: format!("bad {}: {:?}", field, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn two_team_source() -> String {
        "Duke\n\
         Blue Devils\n\
         Tobacco Road powerhouse\n\
         2\n\
         81.5\n\
         67.9\n\
         \n\
         Villanova\n\
         Wildcats\n\
         Streaky three point shooters\n\
         1\n\
         78.0\n\
         70.2\n\
         \n"
            .to_string()
    }

    #[test]
    fn parses_six_line_records() {
        let info = TournamentInfo::from_reader(Cursor::new(two_team_source())).unwrap();
        assert_eq!(info.len(), 2);

        let duke = info.get_team("Duke").unwrap();
        assert_eq!(duke.nickname, "Blue Devils");
        assert_eq!(duke.ranking, 2);
        assert_eq!(duke.offense_ppg, 81.5);
        assert_eq!(duke.defense_ppg, 67.9);
    }

    #[test]
    fn unknown_team_is_none() {
        let info = TournamentInfo::from_reader(Cursor::new(two_team_source())).unwrap();
        assert!(info.get_team("Gonzaga").is_none());
    }

    #[test]
    fn truncated_record_is_data_format_error() {
        let source = "Duke\nBlue Devils\nonly three lines\n";
        let err = TournamentInfo::from_reader(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 1, .. }), "{err}");
    }

    #[test]
    fn unparsable_ranking_is_data_format_error() {
        let source = "Duke\nBlue Devils\ninfo\nsecond\n81.5\n67.9\n\n";
        let err = TournamentInfo::from_reader(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 4, .. }), "{err}");
    }

    #[test]
    fn duplicate_name_overwrites() {
        let source = "Duke\nBlue Devils\nfirst\n2\n81.5\n67.9\n\n\
                      Duke\nBlue Devils\nsecond\n5\n70.0\n70.0\n\n";
        let info = TournamentInfo::from_reader(Cursor::new(source)).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info.get_team("Duke").unwrap().ranking, 5);
    }

    #[test]
    fn seeding_reads_one_name_per_line() {
        let seeding = seeding_from_reader(Cursor::new("Duke\nVillanova\n\n")).unwrap();
        assert_eq!(seeding, vec!["Duke".to_string(), "Villanova".to_string()]);
    }
}
