//! CSV export of a schedule for offline editing and printing.

use crate::models::{Competitor, CompetitorId, Gameday};
use std::io::Write;

/// Name shown for a slot with no competitor yet.
const UNRESOLVED: &str = "TBD";

/// Write one row per fixture: `gameday,label,leg,date,home,away,venue`.
///
/// The date column is the fixture's kick-off when set, else the gameday's date, else empty.
pub fn write_schedule_csv<W: Write>(
    gamedays: &[Gameday],
    competitors: &[Competitor],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["gameday", "label", "leg", "date", "home", "away", "venue"])?;

    for gameday in gamedays {
        for fixture in &gameday.fixtures {
            let date = match (fixture.scheduled_at, gameday.date) {
                (Some(at), _) => at.format("%Y-%m-%d %H:%M").to_string(),
                (None, Some(date)) => date.format("%Y-%m-%d").to_string(),
                (None, None) => String::new(),
            };
            let gameday_number = fixture.gameday.to_string();
            wtr.write_record([
                gameday_number.as_str(),
                fixture.label.as_str(),
                gameday.leg.label(),
                date.as_str(),
                name_of(competitors, fixture.home),
                name_of(competitors, fixture.away),
                fixture.venue.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn name_of(competitors: &[Competitor], id: Option<CompetitorId>) -> &str {
    id.and_then(|id| competitors.iter().find(|c| c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or(UNRESOLVED)
}
