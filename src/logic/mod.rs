//! Fixture generation: round robin pairing, elimination brackets, schedule assembly, export.

mod bracket;
mod draw;
mod export;
mod pairing;
mod schedule;

pub use bracket::{elimination, round_name, total_rounds};
pub use draw::draw_order;
pub use export::write_schedule_csv;
pub use pairing::{gameday_label, rotate, round_robin};
pub use schedule::generate_schedule;
