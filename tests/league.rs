//! Integration tests for the league store, record mapping, CSV export, access and config.

use chrono::NaiveDate;
use league_fixtures::{
    bearer_token, write_schedule_csv, Authorizer, FixtureUpsert, GroupRecord, League,
    LeagueError, LegPolicy, Permission, ServerConfig, TokenAuthorizer, TournamentFormat,
};
use std::collections::HashMap;
use uuid::Uuid;

fn record(json: &str) -> GroupRecord {
    serde_json::from_str(json).unwrap()
}

fn league_with_four_teams() -> (League, Uuid) {
    let mut league = League::new();
    let group = league
        .add_group(record(
            r#"{"name": "Group A", "format": "round_robin", "legs": "single_leg",
                "teams": [{"name": "Lions"}, {"name": "Tigers"}, {"name": "Bears"}, {"name": "Wolves"}]}"#,
        ))
        .unwrap();
    let id = group.id;
    (league, id)
}

fn kickoff() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(17, 30, 0)
        .unwrap()
}

#[test]
fn record_accepts_capitalised_keys() {
    let competition = Uuid::new_v4();
    let json = format!(
        r#"{{"Name": " Cup ", "Format": "Elimination", "Legs": "two-legs", "TeamCount": 6,
            "CompetitionId": "{}", "Teams": [{{"Name": "Lions"}}, {{"name": "Tigers"}}]}}"#,
        competition
    );
    let group = record(&json).into_group();
    assert_eq!(group.name, "Cup");
    assert_eq!(group.format, TournamentFormat::Elimination);
    assert_eq!(group.legs, LegPolicy::TwoLegs);
    assert_eq!(group.declared_count, 6);
    assert_eq!(group.competition_id, competition);
    let names: Vec<&str> = group.competitors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Lions", "Tigers"]);
}

#[test]
fn record_defaults_for_odd_values() {
    let group = record(r#"{"name": "G", "format": "swiss", "legs": "??", "team_count": -4}"#)
        .into_group();
    assert_eq!(group.format, TournamentFormat::RoundRobin);
    assert_eq!(group.legs, LegPolicy::SingleLeg);
    assert_eq!(group.declared_count, 0);
    assert!(group.competitors.is_empty());
}

#[test]
fn add_group_rejects_blank_names_and_replaces_by_id() {
    let mut league = League::new();
    assert_eq!(
        league.add_group(record(r#"{"name": "   "}"#)).unwrap_err(),
        LeagueError::EmptyGroupName
    );

    let id = Uuid::new_v4();
    league
        .add_group(record(&format!(r#"{{"id": "{}", "name": "First"}}"#, id)))
        .unwrap();
    league
        .add_group(record(&format!(r#"{{"id": "{}", "name": "Renamed"}}"#, id)))
        .unwrap();
    assert_eq!(league.groups().len(), 1);
    assert_eq!(league.group(id).unwrap().name, "Renamed");
}

#[test]
fn generate_and_read_back_schedule() {
    let (mut league, id) = league_with_four_teams();
    assert!(league.schedule(id).unwrap().is_empty());
    assert_eq!(league.generate_schedule(id).unwrap().len(), 3);
    assert_eq!(league.schedule(id).unwrap().len(), 3);

    let missing = Uuid::new_v4();
    assert_eq!(
        league.generate_schedule(missing).unwrap_err(),
        LeagueError::GroupNotFound(missing)
    );
    assert!(league.fixtures_for_group(missing).is_err());
}

#[test]
fn upsert_saves_and_replaces_fixtures() {
    let (mut league, id) = league_with_four_teams();
    let draft = league.generate_schedule(id).unwrap()[0].fixtures[0].clone();

    let upsert = FixtureUpsert {
        group_id: id,
        gameday: draft.gameday,
        number: draft.number,
        label: draft.label.clone(),
        scheduled_at: kickoff(),
        home: draft.home,
        away: draft.away,
        venue: Some(" Estadio Central ".to_string()),
    };
    let saved = league.upsert_fixture(draft.id, upsert.clone()).unwrap();
    assert_eq!(saved.scheduled_at, Some(kickoff()));
    assert_eq!(saved.venue.as_deref(), Some("Estadio Central"));

    let swapped = FixtureUpsert {
        home: draft.away,
        away: draft.home,
        venue: None,
        ..upsert
    };
    league.upsert_fixture(draft.id, swapped).unwrap();

    let fixtures = league.fixtures_for_group(id).unwrap();
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].home, draft.away);
    assert_eq!(fixtures[0].venue, None);
}

#[test]
fn upsert_validates_label_and_teams() {
    let (mut league, id) = league_with_four_teams();
    let teams: Vec<Uuid> = league
        .group(id)
        .unwrap()
        .competitors
        .iter()
        .map(|c| c.id)
        .collect();
    let base = FixtureUpsert {
        group_id: id,
        gameday: 1,
        number: 1,
        label: "Gameday 1".to_string(),
        scheduled_at: kickoff(),
        home: Some(teams[0]),
        away: Some(teams[1]),
        venue: None,
    };

    let blank = FixtureUpsert {
        label: "  ".to_string(),
        ..base.clone()
    };
    assert_eq!(
        league.upsert_fixture(Uuid::new_v4(), blank).unwrap_err(),
        LeagueError::EmptyLabel
    );

    let same = FixtureUpsert {
        away: Some(teams[0]),
        ..base.clone()
    };
    assert_eq!(
        league.upsert_fixture(Uuid::new_v4(), same).unwrap_err(),
        LeagueError::SameCompetitor
    );

    let stranger = Uuid::new_v4();
    let unknown = FixtureUpsert {
        away: Some(stranger),
        ..base.clone()
    };
    assert_eq!(
        league.upsert_fixture(Uuid::new_v4(), unknown).unwrap_err(),
        LeagueError::UnknownCompetitor(stranger)
    );

    let unresolved = FixtureUpsert {
        home: None,
        away: None,
        ..base
    };
    assert!(league.upsert_fixture(Uuid::new_v4(), unresolved).is_ok());
}

#[test]
fn fixtures_are_ordered_by_gameday_then_kickoff() {
    let (mut league, id) = league_with_four_teams();
    for (gameday, hour) in [(2, 12), (1, 18), (1, 15)] {
        let upsert = FixtureUpsert {
            group_id: id,
            gameday,
            number: 0,
            label: format!("Gameday {}", gameday),
            scheduled_at: NaiveDate::from_ymd_opt(2026, 4, gameday)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            home: None,
            away: None,
            venue: None,
        };
        league.upsert_fixture(Uuid::new_v4(), upsert).unwrap();
    }
    let order: Vec<(u32, String)> = league
        .fixtures_for_group(id)
        .unwrap()
        .iter()
        .map(|f| (f.gameday, f.scheduled_at.unwrap().format("%H").to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, "15".to_string()),
            (1, "18".to_string()),
            (2, "12".to_string())
        ]
    );
}

#[test]
fn csv_export_names_teams_and_marks_open_slots() {
    let (mut league, id) = league_with_four_teams();
    let gamedays = league.generate_schedule(id).unwrap().to_vec();
    let group = league.group(id).unwrap();

    let mut out = Vec::new();
    write_schedule_csv(&gamedays, &group.competitors, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "gameday,label,leg,date,home,away,venue");
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], "1,Gameday 1,First leg,,Lions,Wolves,");

    let cup = league
        .add_group(record(r#"{"name": "Cup", "format": "knockout", "team_count": 2}"#))
        .unwrap()
        .id;
    let bracket = league.generate_schedule(cup).unwrap().to_vec();
    let mut out = Vec::new();
    write_schedule_csv(&bracket, &[], &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().nth(1), Some("1,Final,First leg,,TBD,TBD,"));
}

#[test]
fn saved_edits_show_up_in_schedule_and_export() {
    let mut league = League::new();
    let id = league
        .add_group(record(
            r#"{"name": "Final Four", "teams": [{"name": "Lions"}, {"name": "Tigers"}]}"#,
        ))
        .unwrap()
        .id;
    let draft = league.generate_schedule(id).unwrap()[0].fixtures[0].clone();
    let upsert = FixtureUpsert {
        group_id: id,
        gameday: draft.gameday,
        number: draft.number,
        label: draft.label.clone(),
        scheduled_at: kickoff(),
        home: draft.away,
        away: draft.home,
        venue: Some("Estadio".to_string()),
    };
    league.upsert_fixture(draft.id, upsert).unwrap();

    let scheduled = &league.schedule(id).unwrap()[0].fixtures[0];
    assert_eq!(scheduled.scheduled_at, Some(kickoff()));
    assert_eq!(scheduled.venue.as_deref(), Some("Estadio"));
    assert_eq!(scheduled.home, draft.away);
    assert_eq!(scheduled.number, draft.number);

    let group = league.group(id).unwrap();
    let mut out = Vec::new();
    write_schedule_csv(league.schedule(id).unwrap(), &group.competitors, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text.lines().nth(1),
        Some("1,Gameday 1,First leg,2026-03-14 17:30,Tigers,Lions,Estadio")
    );

    // Regenerating keeps the saved edits.
    league.generate_schedule(id).unwrap();
    let regenerated = &league.schedule(id).unwrap()[0].fixtures[0];
    assert_eq!(regenerated.venue.as_deref(), Some("Estadio"));
}

#[test]
fn replacing_a_group_drops_fixtures_with_departed_teams() {
    let mut league = League::new();
    let id = Uuid::new_v4();
    let lions = Uuid::new_v4();
    let tigers = Uuid::new_v4();
    let bears = Uuid::new_v4();
    league
        .add_group(record(&format!(
            r#"{{"id": "{id}", "name": "G", "teams": [
                {{"id": "{lions}", "name": "Lions"}}, {{"id": "{tigers}", "name": "Tigers"}},
                {{"id": "{bears}", "name": "Bears"}}]}}"#
        )))
        .unwrap();
    let save = |home: Uuid, away: Uuid| FixtureUpsert {
        group_id: id,
        gameday: 1,
        number: 0,
        label: "Gameday 1".to_string(),
        scheduled_at: kickoff(),
        home: Some(home),
        away: Some(away),
        venue: None,
    };
    league.upsert_fixture(Uuid::new_v4(), save(lions, tigers)).unwrap();
    league.upsert_fixture(Uuid::new_v4(), save(lions, bears)).unwrap();

    league
        .add_group(record(&format!(
            r#"{{"id": "{id}", "name": "G", "teams": [
                {{"id": "{lions}", "name": "Lions"}}, {{"id": "{tigers}", "name": "Tigers"}}]}}"#
        )))
        .unwrap();
    let fixtures = league.fixtures_for_group(id).unwrap();
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].away, Some(tigers));
}

#[test]
fn fixture_cannot_move_to_another_group() {
    let (mut league, id) = league_with_four_teams();
    let other = league
        .add_group(record(r#"{"name": "Group B"}"#))
        .unwrap()
        .id;
    let fixture = Uuid::new_v4();
    let upsert = FixtureUpsert {
        group_id: id,
        gameday: 1,
        number: 0,
        label: "Gameday 1".to_string(),
        scheduled_at: kickoff(),
        home: None,
        away: None,
        venue: None,
    };
    league.upsert_fixture(fixture, upsert.clone()).unwrap();

    let moved = FixtureUpsert {
        group_id: other,
        ..upsert
    };
    assert_eq!(
        league.upsert_fixture(fixture, moved).unwrap_err(),
        LeagueError::FixtureGroupMismatch(fixture)
    );
    assert_eq!(league.fixtures_for_group(id).unwrap().len(), 1);
    assert!(league.fixtures_for_group(other).unwrap().is_empty());
}

#[test]
fn token_authorizer_grants_only_the_admin_token() {
    let closed = TokenAuthorizer::new(None);
    assert!(!closed.is_configured());
    assert!(!closed.has_permission(Some("anything"), Permission::ManageMatches));

    let blank = TokenAuthorizer::new(Some("  ".to_string()));
    assert!(!blank.is_configured());

    let auth = TokenAuthorizer::new(Some("s3cret".to_string()));
    assert!(auth.has_permission(Some("s3cret"), Permission::ManageMatches));
    assert!(auth.has_permission(Some("s3cret"), Permission::ManageCompetitions));
    assert!(!auth.has_permission(Some("wrong"), Permission::ManageMatches));
    assert!(!auth.has_permission(None, Permission::ManageMatches));

    assert_eq!(Permission::ManageMatches.name(), "manage_matches");
    assert_eq!(Permission::ManageCompetitions.name(), "manage_competitions");
}

#[test]
fn bearer_token_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
    assert_eq!(bearer_token(Some("Bearer   ")), None);
    assert_eq!(bearer_token(Some("Basic abc")), None);
    assert_eq!(bearer_token(Some("bearer abc")), Some("abc"));
    assert_eq!(bearer_token(Some("BEARER  abc ")), Some("abc"));
    assert_eq!(bearer_token(Some("Bearer")), None);
    assert_eq!(bearer_token(None), None);
}

#[test]
fn config_from_lookup() {
    let empty: HashMap<&str, &str> = HashMap::new();
    let config = ServerConfig::from_lookup(|k| empty.get(k).map(|v| v.to_string()));
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);

    let vars = HashMap::from([("HOST", "127.0.0.1"), ("PORT", "9000"), ("ADMIN_TOKEN", "t")]);
    let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.admin_token.as_deref(), Some("t"));

    let bad = HashMap::from([("PORT", "eighty")]);
    let config = ServerConfig::from_lookup(|k| bad.get(k).map(|v| v.to_string()));
    assert_eq!(config.port, 8080);
}
