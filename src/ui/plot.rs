use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Trend chart on top, manufacturer ranking below.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.view.filtered.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No registrations match the current filters");
        });
        return;
    }

    let half = (ui.available_height() - ui.spacing().item_spacing.y) / 2.0;
    trend_plot(ui, state, half);
    ranking_plot(ui, state, half);
}

fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Daily registrations per category.
pub fn trend_plot(ui: &mut Ui, state: &AppState, height: f32) {
    Plot::new("trend_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Registrations")
        .x_axis_formatter(|mark: GridMark, _range| x_to_label(mark.value))
        .label_formatter(|name, point| {
            format!("{name}\n{}: {:.0}", x_to_label(point.x), point.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, series) in &state.view.trend {
                let points: PlotPoints = series
                    .iter()
                    .map(|&(date, total)| [date_to_x(date), total as f64])
                    .collect();

                let line = Line::new(points)
                    .name(category.code())
                    .color(state.palette.categories.color_for(category))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// Top manufacturers by total registrations, largest at the top.
pub fn ranking_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let ranking = &state.view.top_manufacturers;
    let names: Vec<&'static str> = ranking.iter().map(|(m, _)| m.name()).collect();

    let bars: Vec<Bar> = ranking
        .iter()
        .enumerate()
        .map(|(i, (m, total))| {
            Bar::new(i as f64, *total as f64)
                .name(m.name())
                .fill(state.palette.manufacturers.color_for(m))
        })
        .collect();

    Plot::new("ranking_plot")
        .height(height)
        .x_axis_label("Total registrations")
        .y_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).map(|n| n.to_string()).unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_axis_round_trips() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(x_to_label(date_to_x(d)), "2024-02-29");
        assert_eq!(x_to_label(date_to_x(d) + 0.4), "2024-02-29");
    }
}
