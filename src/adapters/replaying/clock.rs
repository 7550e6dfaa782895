//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
///
/// A missing or unreadable recording yields the Unix epoch, so a cassette
/// captured without clock reads still replays.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let recorded = next_output(&self.replayer, "clock", "now")
            .and_then(|output| serde_json::from_value(output).map_err(|e| e.to_string()));
        match recorded {
            Ok(time) => time,
            Err(e) => {
                tracing::warn!(error = %e, "no recorded clock value, using the epoch");
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        CassetteReplayer::new(&Cassette { name: "t".into(), recorded_at: Utc::now(), interactions })
    }

    #[test]
    fn serves_recorded_time() {
        let clock = ReplayingClock::new(make_replayer(vec![Interaction {
            seq: 0,
            port: "clock".into(),
            method: "now".into(),
            input: json!({}),
            output: json!("2024-06-15T10:30:00Z"),
        }]));
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn falls_back_to_epoch_when_nothing_was_recorded() {
        let clock = ReplayingClock::new(make_replayer(vec![]));
        assert_eq!(clock.now(), DateTime::<Utc>::UNIX_EPOCH);
    }
}
