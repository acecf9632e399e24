use std::fmt::Write as _;

use form_core::{realtor_search_url, FieldName, Theme, ValidationError};
use session::{
    logging::SessionLogWriter, FormError, FormSession, HistoryView, KeyValueStore,
    PredictionDisplay, PredictionRequestError,
};

use crate::format::{format_price, format_stored_price};

const HISTORY_HEADERS: [&str; 8] = [
    "Living", "Beds", "Baths", "Lot", "Floors", "Age", "ZIP", "Price",
];
const NO_RECOMMENDATIONS: &str = "No specific recommendations available.";

pub fn render_theme(theme: Theme) -> String {
    format!("{} {}", theme.toggle_icon(), theme.label())
}

pub fn render_form<S: KeyValueStore, L: SessionLogWriter>(session: &FormSession<S, L>) -> String {
    let mut out = String::new();
    let purpose = session
        .purpose()
        .map_or("not selected", |purpose| purpose.label());
    let _ = writeln!(out, "Theme: {}", render_theme(session.theme()));
    let _ = writeln!(out, "Purpose: {purpose}");

    if !session.inputs_enabled() {
        let _ = writeln!(out, "Form disabled: {}", FormError::PurposeUnset);
        return out;
    }

    let form = session.form();
    for name in FieldName::ALL {
        let entry = form.entry(name);
        let marker = match (&entry.check, entry.touched) {
            (Ok(_), _) => "ok",
            (Err(_), true) => "!!",
            (Err(_), false) => "..",
        };
        let _ = writeln!(out, "  [{marker}] {:<20} {}", name.label(), entry.raw);
    }
    for (name, err) in form.visible_errors() {
        let _ = writeln!(out, "  {}: {err}", name.as_str());
    }

    let _ = writeln!(out, "Predict: {}", render_submit_state(session));
    out
}

pub fn render_submit_state<S: KeyValueStore, L: SessionLogWriter>(
    session: &FormSession<S, L>,
) -> &'static str {
    if session.submission_in_flight() {
        "waiting for prediction"
    } else if session.can_submit() {
        "ready"
    } else {
        "disabled"
    }
}

pub fn render_field_check(name: FieldName, check: &Result<f64, ValidationError>) -> String {
    match check {
        Ok(_) => format!("{} ok", name.as_str()),
        Err(err) => format!("{}: {err}", name.as_str()),
    }
}

pub fn render_prediction(display: &PredictionDisplay) -> String {
    let result = &display.result;
    let (low, high) = result.confidence_interval;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Estimated home price ({}): {}",
        display.purpose.label(),
        format_price(result.predicted_price)
    );
    let _ = writeln!(
        out,
        "Confidence interval: {} to {}",
        format_price(low),
        format_price(high)
    );

    let listings = result
        .realtor_url
        .clone()
        .unwrap_or_else(|| realtor_search_url(&display.values.zipcode, result.predicted_price));
    let _ = writeln!(out, "Similar listings: {listings}");

    if result.recommendations.is_empty() {
        let _ = writeln!(out, "{NO_RECOMMENDATIONS}");
    } else {
        let _ = writeln!(out, "Recommendations:");
        for recommendation in &result.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }
    out
}

pub fn render_history(view: &HistoryView) -> String {
    if view.is_empty() {
        return "No predictions yet.\n".to_string();
    }

    let rows: Vec<[String; 8]> = view
        .entries
        .iter()
        .map(|record| {
            let values = &record.values;
            [
                values.sqft_living.clone(),
                values.no_of_bedrooms.clone(),
                values.no_of_bathrooms.clone(),
                values.sqft_lot.clone(),
                values.no_of_floors.clone(),
                values.house_age.clone(),
                values.zipcode.clone(),
                format_stored_price(&record.predicted_price),
            ]
        })
        .collect();

    let mut widths = HISTORY_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HISTORY_HEADERS.iter().copied(), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if let Some(toggle) = view.toggle {
        let _ = writeln!(
            out,
            "Showing {} of {} [{}]",
            view.entries.len(),
            view.total,
            toggle.label()
        );
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Blocking notice for a failed prediction request.
pub fn render_alert(err: &PredictionRequestError) -> String {
    format!("Alert: prediction failed. {err}\n")
}

#[cfg(test)]
mod tests {
    use form_core::{FieldName, FieldValues, PredictionRecord, PredictionResult, Purpose, Theme};
    use session::{
        logging::InMemorySessionLog, FormSession, HistoryToggle, HistoryView, MemoryStore,
        PredictionDisplay,
    };

    use super::*;

    fn sample_values() -> FieldValues {
        let mut values = FieldValues::default();
        for (name, raw) in [
            (FieldName::SqftLiving, "2000"),
            (FieldName::Bedrooms, "3"),
            (FieldName::Bathrooms, "2"),
            (FieldName::SqftLot, "5000"),
            (FieldName::Floors, "1"),
            (FieldName::HouseAge, "10"),
            (FieldName::Zipcode, "98101"),
        ] {
            values.set(name, raw);
        }
        values
    }

    #[test]
    fn prediction_message_groups_price_and_links_listings() {
        let display = PredictionDisplay {
            purpose: Purpose::Buy,
            values: sample_values(),
            result: PredictionResult::new(450_000.0, (420_000.0, 480_000.0)),
        };

        let text = render_prediction(&display);

        assert!(text.contains("Estimated home price (Buying): $450,000"));
        assert!(text.contains("Confidence interval: $420,000 to $480,000"));
        assert!(text.contains("realestateandhomes-search/98101/price-400000-500000"));
        assert!(text.contains("No specific recommendations available."));
    }

    #[test]
    fn prediction_message_prefers_backend_realtor_url() {
        let mut result = PredictionResult::new(1.0, (0.0, 2.0));
        result.realtor_url = Some("https://example.test/listings".into());
        result.recommendations = vec!["Price slightly below market.".into()];
        let display = PredictionDisplay {
            purpose: Purpose::Sell,
            values: sample_values(),
            result,
        };

        let text = render_prediction(&display);

        assert!(text.contains("Similar listings: https://example.test/listings"));
        assert!(text.contains("  - Price slightly below market."));
    }

    #[test]
    fn history_table_keeps_field_values_and_two_decimal_price() {
        let view = HistoryView {
            entries: vec![PredictionRecord::new(sample_values(), 450_000.0)],
            total: 1,
            toggle: None,
        };

        let text = render_history(&view);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Living"));
        let cells: Vec<_> = lines[1].split_whitespace().collect();
        assert_eq!(
            cells,
            vec!["2000", "3", "2", "5000", "1", "10", "98101", "$450,000.00"]
        );
    }

    #[test]
    fn history_footer_shows_toggle_label() {
        let view = HistoryView {
            entries: vec![PredictionRecord::new(sample_values(), 1.0); 5],
            total: 6,
            toggle: Some(HistoryToggle::ShowAll),
        };

        let text = render_history(&view);

        assert!(text.ends_with("Showing 5 of 6 [Show All]\n"));
    }

    #[test]
    fn empty_history_renders_placeholder() {
        let view = HistoryView {
            entries: Vec::new(),
            total: 0,
            toggle: None,
        };

        assert_eq!(render_history(&view), "No predictions yet.\n");
    }

    #[test]
    fn form_is_reported_disabled_until_purpose_is_chosen() {
        let mut session =
            FormSession::load_with_log(MemoryStore::new(), InMemorySessionLog::new(), None);

        let disabled = render_form(&session);
        session.select_purpose(Purpose::Buy);
        assert!(session.edit_field(FieldName::Bedrooms, "40").unwrap().is_err());
        let enabled = render_form(&session);

        assert!(disabled.contains("Form disabled: Please select a purpose"));
        assert!(enabled.contains("Purpose: Buying"));
        assert!(enabled.contains("no_of_bedrooms: Number of bedrooms must be between 1 and 25."));
        assert!(enabled.contains("Predict: disabled"));
    }

    #[test]
    fn theme_shows_icon_for_the_other_mode() {
        assert_eq!(render_theme(Theme::Dark), "☀ Dark Mode");
        assert_eq!(render_theme(Theme::Light), "☾ Light Mode");
    }

    #[test]
    fn alert_names_the_failure() {
        let text = render_alert(&PredictionRequestError::Status(503));

        assert_eq!(
            text,
            "Alert: prediction failed. prediction service responded with status 503\n"
        );
    }
}
