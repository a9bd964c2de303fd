use anyhow::Result;
use mealdex_core::{SearchableItem, score};
use mealdex_tui::{MealLogOutcome, portion};
use serde_json::{Value, json};

/// What the binary prints once it is done.
#[derive(Debug)]
pub(crate) enum MealReport {
	/// Ranked results of a one-shot query.
	Results {
		term: String,
		items: Vec<SearchableItem>,
	},
	/// Entries logged in the interactive screen.
	Session(MealLogOutcome),
}

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &MealReport) {
	for line in plain_lines(report) {
		println!("{line}");
	}
}

fn plain_lines(report: &MealReport) -> Vec<String> {
	match report {
		MealReport::Results { term, items } => {
			if items.is_empty() {
				return vec![format!("No results for '{term}'")];
			}
			let normalized = mealdex_core::normalize_term(term);
			items
				.iter()
				.map(|item| {
					format!("{:>3}  {}  {}", score(item, &normalized), item.key(), item.name)
				})
				.collect()
		}
		MealReport::Session(outcome) => {
			if outcome.entries.is_empty() {
				return vec![format!("Nothing logged (query: '{}')", outcome.query)];
			}
			let mut lines: Vec<String> = outcome
				.entries
				.iter()
				.map(|item| {
					let calories = portion(item).calories;
					format!("{}  {}  {calories:.0} kcal", item.key(), item.name)
				})
				.collect();
			lines.push(format!("Total: {:.0} kcal", outcome.totals().calories));
			lines
		}
	}
}

/// Format the report as a JSON string.
pub(crate) fn format_report_json(report: &MealReport) -> Result<String> {
	let payload = match report {
		MealReport::Results { term, items } => {
			let normalized = mealdex_core::normalize_term(term);
			let rows = items
				.iter()
				.map(|item| {
					json!({
						"score": score(item, &normalized),
						"key": item.key().as_str(),
						"name": item.name,
						"isRecipe": item.is_recipe,
						"calories": item.headline_calories(),
					})
				})
				.collect::<Vec<Value>>();
			Value::Array(rows)
		}
		MealReport::Session(outcome) => {
			let entries = outcome
				.entries
				.iter()
				.map(|item| {
					json!({
						"key": item.key().as_str(),
						"name": item.name,
						"portion": portion(item),
					})
				})
				.collect::<Vec<Value>>();
			json!({
				"query": outcome.query,
				"entries": entries,
				"totals": outcome.totals(),
			})
		}
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &MealReport) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use mealdex_core::Nutrition;

	use super::*;

	fn results() -> MealReport {
		MealReport::Results {
			term: "Mela".into(),
			items: vec![
				SearchableItem::food("f1", "Mela"),
				SearchableItem::recipe("r1", "Mela cotta"),
			],
		}
	}

	#[test]
	fn plain_results_list_score_key_and_name() {
		assert_eq!(
			plain_lines(&results()),
			vec!["100  f1  Mela", " 90  recipe-r1  Mela cotta"]
		);
	}

	#[test]
	fn json_results_are_an_array() {
		let json = format_report_json(&results()).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value[0]["score"], 100);
		assert_eq!(value[1]["key"], "recipe-r1");
		assert_eq!(value[1]["isRecipe"], true);
	}

	#[test]
	fn session_report_sums_portions() {
		let outcome = MealLogOutcome {
			entries: vec![
				SearchableItem::food("f1", "Mela").with_nutrition(Nutrition {
					calories: 52.0,
					..Nutrition::default()
				}),
				SearchableItem::recipe("r1", "Mela cotta").with_totals(
					Nutrition {
						calories: 400.0,
						..Nutrition::default()
					},
					800.0,
					4.0,
				),
			],
			query: String::new(),
		};
		let report = MealReport::Session(outcome);

		let lines = plain_lines(&report);
		assert_eq!(lines.last().map(String::as_str), Some("Total: 152 kcal"));

		let json = format_report_json(&report).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["totals"]["calories"], 152.0);
		assert_eq!(value["entries"][1]["portion"]["calories"], 100.0);
	}

	#[test]
	fn empty_session_mentions_the_query() {
		let report = MealReport::Session(MealLogOutcome {
			entries: Vec::new(),
			query: "pan".into(),
		});
		assert_eq!(plain_lines(&report), vec!["Nothing logged (query: 'pan')"]);
	}
}
