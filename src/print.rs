use std::fmt::Display;

use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::{ComputableValue, Die};

const BAR_WIDTH: f64 = 40.0;

pub trait PrintExt {
    fn table(&self) -> String;

    fn print_table(&self) {
        print!("{}", self.table());
    }
}

impl<T> PrintExt for Die<T>
where
    T: ComputableValue + Display,
{
    fn table(&self) -> String {
        let pb = self.probabilities();
        let mean = self.mean();
        let stddev = self.stddev();
        let denom = self.denom();
        let top = pb.iter().copied().fold(0.0, f64::max);

        let mut table = Table::new();
        table
            .load_preset(UTF8_NO_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Value"),
                Cell::new("Probability"),
                Cell::new(""),
            ]);
        for ((value, weight), prob) in self.iter().zip(pb) {
            let bar = "#".repeat((prob / top * BAR_WIDTH).round() as usize);
            table.add_row(vec![
                Cell::new(value.to_string()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:6.2}%", prob * 100.0)).set_alignment(CellAlignment::Right),
                Cell::new(bar),
            ]);
            log::trace!("{value}: {weight}/{denom}");
        }

        format!("Mean: {mean:.3}±{stddev:.3} | Outcomes: {denom}\n\n{table}\n")
    }
}
