mod clock;
mod cycle;
pub mod delivery;
mod next_prayer;
mod night;
mod remaining;

pub use clock::{Clock, LocalClock};
pub use cycle::{AnnouncementCycle, CycleState, DEFAULT_PERIOD};
pub use delivery::{Announcement, AnnouncementChannel};
pub use next_prayer::{UpcomingPrayer, next_prayer, resolve_occurrence};
pub use night::{last_third_start, night_point_before_fajr};
pub use remaining::RemainingDuration;
