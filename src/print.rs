//! Console tabulation of predictions.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::predictor::{PlayerFailure, Predictions};
use crate::statistic::Statistic;

fn by_descending_value(a: &(&String, &f64), b: &(&String, &f64)) -> Ordering {
    b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// A two-column table of players and their predicted values, highest first.
pub fn tabulate_predictions(predictions: &Predictions, value_heading: &str) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Player".into(), value_heading.into()],
        ));

    let mut values: Vec<_> = predictions.values.iter().collect();
    values.sort_by(by_descending_value);
    for (player, value) in values {
        table.push_row(Row::new(
            Styles::default(),
            vec![player.as_str().into(), format!("{value:.3}").into()],
        ));
    }
    table
}

pub fn tabulate_failures(failures: &[PlayerFailure]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(40)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Player".into(), "Reason".into()],
        ));
    for failure in failures {
        table.push_row(Row::new(
            Styles::default(),
            vec![failure.player.clone().into(), failure.error.to_string().into()],
        ));
    }
    table
}

/// A table of fantasy points per player, with a column for each statistic and their total.
/// Players absent from a statistic contribute nothing to it.
pub fn tabulate_fantasy_points(columns: &[(Statistic, Predictions)]) -> Table {
    let mut totals = FxHashMap::default();
    for (_, predictions) in columns {
        for (player, value) in &predictions.values {
            *totals.entry(player).or_insert(0.0) += value;
        }
    }

    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(
                Styles::default().with(MinWidth(24)).with(HAlign::Left),
            )];
            for _ in columns {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(10)).with(HAlign::Right),
                ));
            }
            cols.push(Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ));
            cols
        })
        .with_row({
            let mut header_cells = vec!["Player".into()];
            for (statistic, _) in columns {
                header_cells.push(statistic.to_string().into());
            }
            header_cells.push("Total".into());
            Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                header_cells,
            )
        });

    let mut totals: Vec<_> = totals.into_iter().collect();
    totals.sort_by(|a, b| by_descending_value(&(a.0, &a.1), &(b.0, &b.1)));
    for (player, total) in totals {
        let mut row_cells = vec![player.as_str().into()];
        for (_, predictions) in columns {
            row_cells.push(match predictions.values.get(player) {
                None => "-".into(),
                Some(value) => format!("{value:.3}").into(),
            });
        }
        row_cells.push(format!("{total:.3}").into());
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::markdown::Markdown;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::predictor::PredictionError;

    fn predictions(values: &[(&str, f64)]) -> Predictions {
        Predictions {
            values: values
                .iter()
                .map(|&(player, value)| (player.to_string(), value))
                .collect(),
            failures: vec![],
        }
    }

    #[test]
    fn predictions_ordered_by_value() {
        let table = tabulate_predictions(
            &predictions(&[("Bo Nix", 0.9), ("Josh Allen", 1.55)]),
            "Expectation",
        );
        assert_eq!(3, table.num_rows());
        let rendered = Markdown::default().render(&table).to_string();
        let allen = rendered.find("Josh Allen").unwrap();
        let nix = rendered.find("Bo Nix").unwrap();
        assert!(allen < nix, "{rendered}");
        assert!(rendered.contains("1.550"), "{rendered}");
    }

    #[test]
    fn failures() {
        let table = tabulate_failures(&[PlayerFailure {
            player: "Tom Brady".into(),
            error: PredictionError::UnresolvablePlayer("Tom Brady".into()),
        }]);
        assert_eq!(2, table.num_rows());
        let rendered = Markdown::default().render(&table).to_string();
        assert!(rendered.contains("does not appear in the market"), "{rendered}");
    }

    #[test]
    fn fantasy_points_totalled() {
        let table = tabulate_fantasy_points(&[
            (
                Statistic::PassingTouchdowns,
                predictions(&[("Josh Allen", 3.9), ("Bo Nix", 3.0)]),
            ),
            (Statistic::RushingYards, predictions(&[("Josh Allen", 3.5)])),
        ]);
        assert_eq!(3, table.num_rows());
        assert_eq!(4, table.num_cols());
        let rendered = Markdown::default().render(&table).to_string();
        assert!(rendered.contains("7.400"), "{rendered}");
        assert!(rendered.contains("PASS_TDS"), "{rendered}");
        assert!(rendered.contains("RUSH_YDS"), "{rendered}");
    }
}
