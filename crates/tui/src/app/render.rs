use ratatui::Frame;
use ratatui::text::{Line, Span};

use super::App;
use super::state::{TOTALS_ROWS, portion, totals};
use crate::viewport::Viewport;

const HELP: &str = "Enter select  Esc close/quit  Tab focus  PgUp/PgDn scroll  Ctrl+Z undo";

impl App<'_> {
	pub fn draw(&mut self, frame: &mut Frame) {
		if frame.area() != self.screen {
			self.resize(frame.area());
			self.field.sync_overlay(&self.viewport);
		}
		let theme = self.options.theme;

		for (row, line) in self.content_lines() {
			draw_row(frame, &self.viewport, row, &line);
		}

		self.field.render_input(frame, &self.viewport, &theme);
		self.field.render_overlay(frame, &theme);
		self.toasts.render(frame, self.screen, &theme);
	}

	/// Text rows of the content, excluding the input and dropdown areas.
	fn content_lines(&self) -> Vec<(u16, Line<'static>)> {
		let theme = &self.options.theme;
		let labels = &self.options.labels;
		let width = usize::from(self.layout.input.width);
		let mut lines = Vec::new();

		lines.push((0, Line::from(Span::styled(labels.log_title.clone(), theme.header))));
		if self.entries.is_empty() {
			lines.push((1, Line::from(Span::styled("Nothing logged yet", theme.empty_style()))));
		}
		for (row, item) in (1u16..).zip(&self.entries) {
			let amount = if item.is_recipe { "1 serving" } else { "100 g" };
			let calories = format!("{:.0} kcal", portion(item).calories);
			let name_width = width.saturating_sub(amount.len() + calories.len() + 4);
			let name: String = item.name.chars().take(name_width).collect();
			lines.push((
				row,
				Line::from(vec![
					Span::raw(format!("{name:<name_width$}  ")),
					Span::styled(amount, theme.empty_style()),
					Span::raw("  "),
					Span::raw(calories),
				]),
			));
		}

		let sums = totals(&self.entries);
		let top = self.layout.totals_top;
		lines.push((top, Line::from(Span::styled(labels.totals_title.clone(), theme.header))));
		let rows = [
			("Calories", sums.calories, "kcal"),
			("Proteins", sums.proteins, "g"),
			("Carbs", sums.carbs, "g"),
			("Fats", sums.fats, "g"),
			("Fibers", sums.fibers, "g"),
		];
		for (offset, (label, value, unit)) in (1u16..TOTALS_ROWS).zip(rows) {
			lines.push((top + offset, Line::from(format!("{label:<10}{value:>8.1} {unit}"))));
		}

		lines.push((
			self.layout.help_top,
			Line::from(Span::styled(HELP, theme.empty_style())),
		));
		lines
	}
}

fn draw_row(frame: &mut Frame, viewport: &Viewport, row: u16, line: &Line<'_>) {
	let area = viewport.area();
	let y = viewport.screen_row(row);
	if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
		return;
	}
	let Ok(y) = u16::try_from(y) else {
		return;
	};
	frame.buffer_mut().set_line(area.x, y, line, area.width);
}
