//! Scrolling-text overlay, reduced to its possession logic: themed
//! phrase emission through a caller-supplied sink, alternating with a
//! quiet background phase on the page's fixed timings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::theme::OsTheme;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_info;

/// Phase durations from the page's presentation loop: text for 3 s,
/// background animation for 5 s.
const MARQUEE_PHASE: Duration = Duration::from_secs(3);
const BACKGROUND_PHASE: Duration = Duration::from_secs(5);

/// Opening burst when a marquee phase starts, then a steady drip of
/// 1-3 lines per interval.
const BURST_LINES: usize = 8;
const DRIP_INTERVAL: Duration = Duration::from_millis(800);

/// Emits themed marquee lines.
pub struct Marquee {
    phrases: &'static [&'static str],
    rng: StdRng,
}

impl Marquee {
    pub fn new(theme: &'static OsTheme) -> Self {
        Self {
            phrases: theme.marquee,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn line(&mut self) -> &'static str {
        self.phrases[self.rng.gen_range(0..self.phrases.len())]
    }

    pub fn burst(&mut self, sink: &mut impl FnMut(&str)) {
        for _ in 0..BURST_LINES {
            let line = self.line();
            sink(line);
        }
    }
}

/// Alternate marquee and background phases until cancelled.
pub async fn run_cycle(
    theme: &'static OsTheme,
    mut sink: impl FnMut(&str),
    cancel: CancellationToken,
) {
    let mut marquee = Marquee::new(theme);

    loop {
        // Marquee phase: one burst, then a drip until the phase ends.
        marquee.burst(&mut sink);
        let mut drip = interval(DRIP_INTERVAL);
        drip.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = sleep(MARQUEE_PHASE);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    log_info!("overlay cycle shutting down");
                    return;
                }
                _ = &mut deadline => break,
                _ = drip.tick() => {
                    let lines = marquee.rng.gen_range(1..=3);
                    for _ in 0..lines {
                        let line = marquee.line();
                        sink(line);
                    }
                }
            }
        }

        // Background phase: the overlay stays quiet.
        tokio::select! {
            _ = cancel.cancelled() => {
                log_info!("overlay cycle shutting down");
                return;
            }
            _ = sleep(BACKGROUND_PHASE) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::OsCategory;
    use crate::theme::theme_for;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_marquee_lines_come_from_the_theme() {
        let theme = theme_for(OsCategory::Ios);
        let mut marquee = Marquee::new(theme);
        for _ in 0..50 {
            assert!(theme.marquee.contains(&marquee.line()));
        }
    }

    #[test]
    fn test_burst_emits_a_fixed_number_of_lines() {
        let mut marquee = Marquee::new(theme_for(OsCategory::Windows));
        let mut lines = Vec::new();
        marquee.burst(&mut |line| lines.push(line.to_string()));
        assert_eq!(lines.len(), BURST_LINES);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_emits_and_stops_on_cancel() {
        let theme = theme_for(OsCategory::Android);
        let lines = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancellationToken::new();

        let task = {
            let lines = Arc::clone(&lines);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                run_cycle(
                    theme,
                    move |line: &str| lines.lock().unwrap().push(line.to_string()),
                    cancel,
                )
                .await;
            })
        };

        // Let one full marquee phase and part of the background run.
        tokio::time::sleep(Duration::from_secs(4)).await;
        cancel.cancel();
        task.await.unwrap();

        let lines = lines.lock().unwrap();
        assert!(lines.len() >= BURST_LINES);
        assert!(lines.iter().all(|l| theme.marquee.contains(&l.as_str())));
    }
}
