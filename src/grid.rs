use chrono::{Datelike, NaiveDate};

use crate::calendar::MonthIndex;
use crate::counts::PostCounts;

/// One day of the displayed month, annotated for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    day_num: u32,
    is_today: bool,
    count: u32,
}

impl DayCell {
    pub fn day_num(&self) -> u32 {
        self.day_num
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Leading cell before day 1, so day 1 lands in its weekday column.
    Padding,
    Day(DayCell),
}

/// The cell sequence for one month: `weekday_offset` padding cells, then
/// one day cell per day. No trailing padding; the last row wraps short.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    month: MonthIndex,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub const COLUMNS: usize = 7;

    pub fn new(month: MonthIndex, today: &NaiveDate, counts: &PostCounts) -> Self {
        let in_month = month.contains(today);

        let cells = std::iter::repeat(GridCell::Padding)
            .take(month.weekday_offset() as usize)
            .chain((1..=month.num_days()).map(|day_num| {
                GridCell::Day(DayCell {
                    day_num,
                    is_today: in_month && today.day() == day_num,
                    count: counts.for_day(&month, day_num),
                })
            }))
            .collect();

        MonthGrid { month, cells }
    }

    pub fn month(&self) -> &MonthIndex {
        &self.month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Rows of at most seven cells, for column-aligned rendering.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(Self::COLUMNS)
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Padding => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn march_2024() -> MonthIndex {
        MonthIndex::new(Month::March, 2024)
    }

    fn day(grid: &MonthGrid, day_num: u32) -> DayCell {
        *grid
            .day_cells()
            .find(|cell| cell.day_num() == day_num)
            .unwrap()
    }

    #[test]
    fn cell_sequence_is_offset_then_days() {
        // March 2024 starts on a Friday: 5 padding cells, 31 day cells
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let grid = MonthGrid::new(march_2024(), &today, &PostCounts::empty());

        assert_eq!(grid.cells().len(), 5 + 31);
        assert_eq!(grid.day_cells().count(), 31);
        assert!(grid.cells()[..5]
            .iter()
            .all(|cell| *cell == GridCell::Padding));
        assert!(matches!(grid.cells()[5], GridCell::Day(d) if d.day_num() == 1));
    }

    #[test]
    fn day_numbers_are_consecutive() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let grid = MonthGrid::new(march_2024(), &today, &PostCounts::empty());

        let nums: Vec<u32> = grid.day_cells().map(|cell| cell.day_num()).collect();
        assert_eq!(nums, (1..=31).collect::<Vec<u32>>());
    }

    #[test]
    fn counts_are_merged_into_cells() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let counts: PostCounts = vec![("2024-03-05".to_owned(), 3)].into_iter().collect();
        let grid = MonthGrid::new(march_2024(), &today, &counts);

        assert_eq!(day(&grid, 5).count(), 3);
        assert!(grid
            .day_cells()
            .filter(|cell| cell.day_num() != 5)
            .all(|cell| cell.count() == 0));
    }

    #[test]
    fn today_is_marked_only_in_its_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let grid = MonthGrid::new(march_2024(), &today, &PostCounts::empty());
        assert!(day(&grid, 5).is_today());
        assert_eq!(grid.day_cells().filter(|cell| cell.is_today()).count(), 1);

        let other = MonthGrid::new(
            MonthIndex::new(Month::April, 2024),
            &today,
            &PostCounts::empty(),
        );
        assert_eq!(other.day_cells().filter(|cell| cell.is_today()).count(), 0);
    }

    #[test]
    fn weeks_wrap_at_seven_cells() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let grid = MonthGrid::new(march_2024(), &today, &PostCounts::empty());

        let weeks: Vec<&[GridCell]> = grid.weeks().collect();
        // 36 cells: five full rows and a trailing row of one
        assert_eq!(weeks.len(), 6);
        assert!(weeks[..5].iter().all(|week| week.len() == 7));
        assert_eq!(weeks[5].len(), 1);
    }

    #[test]
    fn month_without_offset_has_no_padding() {
        // January 2023 starts on a Sunday
        let today = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let grid = MonthGrid::new(
            MonthIndex::new(Month::January, 2023),
            &today,
            &PostCounts::empty(),
        );

        assert_eq!(grid.cells().len(), 31);
        assert!(matches!(grid.cells()[0], GridCell::Day(d) if d.day_num() == 1));
    }
}
