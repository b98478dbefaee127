use std::io::{self, Write};

use crate::grid::{GridCell, MonthGrid};

const HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Plain-text month renderer: title, Sunday-first weekday header, one row
/// per week, then a summary of days with activity.
pub struct Renderer {
    today_symbol: char,
    cell_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            today_symbol: '*',
            cell_width: 7,
        }
    }
}

impl Renderer {
    pub fn today_symbol(mut self, symbol: char) -> Self {
        self.today_symbol = symbol;
        self
    }

    pub fn render(&self, grid: &MonthGrid, out: &mut dyn Write) -> io::Result<()> {
        let month = grid.month();

        writeln!(out, "{} {}", month.month().name(), month.year())?;

        for head in HEADER.iter() {
            write!(out, "{:>width$}", head, width = self.cell_width)?;
        }
        writeln!(out)?;

        for week in grid.weeks() {
            for cell in week {
                let text = match cell {
                    GridCell::Padding => String::new(),
                    GridCell::Day(day) => {
                        let marker = if day.is_today() {
                            self.today_symbol
                        } else {
                            ' '
                        };

                        if day.count() > 0 {
                            format!("{}{:>2}+{}", marker, day.day_num(), day.count())
                        } else {
                            format!("{}{:>2}", marker, day.day_num())
                        }
                    }
                };

                write!(out, "{:>width$}", text, width = self.cell_width)?;
            }
            writeln!(out)?;
        }

        let active: Vec<_> = grid.day_cells().filter(|cell| cell.count() > 0).collect();
        if !active.is_empty() {
            writeln!(out)?;
            for day in active {
                let noun = if day.count() == 1 { "post" } else { "posts" };
                writeln!(
                    out,
                    "{}  {} {}",
                    month.iso_for_day(day.day_num()),
                    day.count(),
                    noun
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthIndex;
    use crate::counts::PostCounts;
    use chrono::{Month, NaiveDate};

    fn rendered(counts: PostCounts) -> String {
        let month = MonthIndex::new(Month::March, 2024);
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let grid = MonthGrid::new(month, &today, &counts);

        let mut out = Vec::new();
        Renderer::default().render(&grid, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn title_and_header() {
        let output = rendered(PostCounts::empty());
        let mut lines = output.lines();

        assert_eq!(lines.next().unwrap(), "March 2024");
        let header = lines.next().unwrap();
        assert!(header.starts_with("    Sun"));
        assert!(header.ends_with("Sat"));
    }

    #[test]
    fn first_week_is_padded_to_friday() {
        let output = rendered(PostCounts::empty());
        // March 2024: five empty columns, then the 1st and 2nd
        let first_week = output.lines().nth(2).unwrap();
        assert_eq!(first_week.trim_start(), "1      2");
    }

    #[test]
    fn today_marker_and_count_annotation() {
        let counts: PostCounts = vec![("2024-03-05".to_owned(), 3)].into_iter().collect();
        let output = rendered(counts);

        assert!(output.contains("* 5+3"));
        assert!(output.contains("2024-03-05  3 posts"));
    }

    #[test]
    fn no_summary_without_activity() {
        let output = rendered(PostCounts::empty());
        assert!(!output.contains("posts"));
        // title + header + six week rows
        assert_eq!(output.lines().count(), 8);
    }
}
