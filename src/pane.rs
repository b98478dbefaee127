use chrono::prelude::*;
use std::sync::mpsc;

use crate::calendar::MonthIndex;
use crate::counts::PostCounts;
use crate::events::Event;
use crate::grid::MonthGrid;
use crate::provider::CountSource;

/// One calendar instance: the displayed month, its counts, and the
/// bookkeeping that keeps late count responses from clobbering a month
/// the user has already navigated away from.
///
/// Every outgoing request is stamped with a generation number; only the
/// response carrying the current generation is applied.
pub struct CalendarPane {
    month: MonthIndex,
    today: NaiveDate,
    counts: PostCounts,
    generation: u64,
    source: Box<dyn CountSource>,
    sink: mpsc::Sender<Event>,
}

impl CalendarPane {
    /// Opens on the current month and immediately requests its counts.
    pub fn new(source: Box<dyn CountSource>, sink: mpsc::Sender<Event>) -> Self {
        CalendarPane::with_month(MonthIndex::default(), source, sink)
    }

    pub fn with_month(
        month: MonthIndex,
        source: Box<dyn CountSource>,
        sink: mpsc::Sender<Event>,
    ) -> Self {
        let mut pane = CalendarPane {
            month,
            today: Local::now().date_naive(),
            counts: PostCounts::empty(),
            generation: 0,
            source,
            sink,
        };

        pane.request_counts();
        pane
    }

    pub fn month(&self) -> &MonthIndex {
        &self.month
    }

    pub fn counts(&self) -> &PostCounts {
        &self.counts
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.month, &self.today, &self.counts)
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
        self.request_counts();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
        self.request_counts();
    }

    /// Re-requests the displayed month. The only way to recover from a
    /// failed lookup besides navigating.
    pub fn refresh(&mut self) {
        self.request_counts();
    }

    /// ISO date payload for the navigation collaborator; the pane itself
    /// performs no routing. `None` for a day the month does not have.
    pub fn activate_day(&self, day: u32) -> Option<String> {
        if (1..=self.month.num_days()).contains(&day) {
            Some(self.month.iso_for_day(day))
        } else {
            None
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Update => self.today = Local::now().date_naive(),
            Event::CountsLoaded {
                month,
                generation,
                counts,
            } => self.apply_counts(month, generation, counts),
        }
    }

    fn request_counts(&mut self) {
        self.generation += 1;
        self.counts = PostCounts::empty();
        self.source.request(self.month, self.generation, &self.sink);
    }

    fn apply_counts(&mut self, month: MonthIndex, generation: u64, counts: PostCounts) {
        if generation != self.generation {
            log::debug!(
                "discarding stale counts for {}-{:02} (generation {}, now at {})",
                month.year(),
                month.number(),
                generation,
                self.generation
            );
            return;
        }

        if month != self.month {
            // generation matched but the month did not: a source answered
            // with the wrong stamp
            log::warn!(
                "count source answered {}-{:02} for a request about {}-{:02}",
                month.year(),
                month.number(),
                self.month.year(),
                self.month.number()
            );
            return;
        }

        self.counts = counts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records requests instead of answering them, so tests control the
    /// responses completely.
    struct RecordingSource {
        requests: Rc<RefCell<Vec<(MonthIndex, u64)>>>,
    }

    fn recording_pane(month: MonthIndex) -> (CalendarPane, Rc<RefCell<Vec<(MonthIndex, u64)>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let source = RecordingSource {
            requests: Rc::clone(&requests),
        };
        let (tx, _rx) = mpsc::channel();

        (CalendarPane::with_month(month, Box::new(source), tx), requests)
    }

    impl CountSource for RecordingSource {
        fn request(&self, month: MonthIndex, generation: u64, _sink: &mpsc::Sender<Event>) {
            self.requests.borrow_mut().push((month, generation));
        }
    }

    fn march_2024() -> MonthIndex {
        MonthIndex::new(Month::March, 2024)
    }

    fn march_counts() -> PostCounts {
        vec![("2024-03-05".to_owned(), 3)].into_iter().collect()
    }

    #[test]
    fn every_request_gets_a_fresh_generation() {
        let (mut pane, requests) = recording_pane(march_2024());

        pane.next_month();
        pane.refresh();
        pane.prev_month();

        let april = MonthIndex::new(Month::April, 2024);
        assert_eq!(
            *requests.borrow(),
            vec![
                (march_2024(), 1),
                (april, 2),
                (april, 3),
                (march_2024(), 4),
            ]
        );
    }

    #[test]
    fn current_generation_response_is_applied() {
        let (mut pane, _requests) = recording_pane(march_2024());

        pane.handle(Event::CountsLoaded {
            month: march_2024(),
            generation: pane.generation(),
            counts: march_counts(),
        });

        assert_eq!(pane.counts().for_day(&march_2024(), 5), 3);
    }

    #[test]
    fn stale_generation_response_is_discarded() {
        let (mut pane, _requests) = recording_pane(march_2024());
        let stale_generation = pane.generation();

        pane.next_month();

        pane.handle(Event::CountsLoaded {
            month: march_2024(),
            generation: stale_generation,
            counts: march_counts(),
        });

        assert!(pane.counts().is_empty());
    }

    #[test]
    fn navigating_clears_counts_wholesale() {
        let (mut pane, _requests) = recording_pane(march_2024());

        pane.handle(Event::CountsLoaded {
            month: march_2024(),
            generation: pane.generation(),
            counts: march_counts(),
        });
        assert!(!pane.counts().is_empty());

        pane.next_month();
        assert!(pane.counts().is_empty());
    }

    #[test]
    fn mismatched_month_with_current_generation_is_discarded() {
        let (mut pane, _requests) = recording_pane(march_2024());

        pane.handle(Event::CountsLoaded {
            month: MonthIndex::new(Month::April, 2024),
            generation: pane.generation(),
            counts: march_counts(),
        });

        assert!(pane.counts().is_empty());
    }

    #[test]
    fn day_activation_yields_iso_payload() {
        let (pane, _requests) = recording_pane(march_2024());

        assert_eq!(pane.activate_day(5).as_deref(), Some("2024-03-05"));
        assert_eq!(pane.activate_day(31).as_deref(), Some("2024-03-31"));
        assert_eq!(pane.activate_day(0), None);
        assert_eq!(pane.activate_day(32), None);
    }

    #[test]
    fn grid_follows_navigation() {
        let (mut pane, _requests) = recording_pane(march_2024());

        assert_eq!(pane.grid().day_cells().count(), 31);
        pane.prev_month();
        // February 2024 is a leap month
        assert_eq!(pane.grid().day_cells().count(), 29);
    }
}
