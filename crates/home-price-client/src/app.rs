use std::{
    future::Future,
    io::{self, Write},
    pin::Pin,
};

use form_core::FieldName;
use session::{
    logging::SessionLogWriter, FormError, FormSession, KeyValueStore, PendingSubmission,
    Predictor, SubmissionOutcome, SubmissionPipeline,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{parse_command, Command, ParseCommandError};

type InFlight<'a> = Pin<Box<dyn Future<Output = (PendingSubmission, SubmissionOutcome)> + 'a>>;

enum Flow {
    Continue,
    Submit(PendingSubmission),
    Quit,
}

/// Reads commands until `quit` or end of input. A prediction request runs
/// alongside later commands; the loop only exits once it has resolved.
pub async fn run<S, L, P, R, W>(
    session: &mut FormSession<S, L>,
    pipeline: &SubmissionPipeline<P>,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    S: KeyValueStore,
    L: SessionLogWriter,
    P: Predictor,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut in_flight: Option<InFlight<'_>> = None;
    let mut accepting = true;

    write!(output, "{}", ui::render_form(session))?;
    writeln!(output, "Type `help` for commands.")?;
    output.flush()?;

    while accepting || in_flight.is_some() {
        tokio::select! {
            biased;
            (pending, outcome) = next_outcome(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                report_outcome(session, pending, outcome, output)?;
            }
            line = lines.next_line(), if accepting => {
                match line? {
                    Some(line) => match handle_line(session, &line, output)? {
                        Flow::Continue => {}
                        Flow::Submit(pending) => {
                            in_flight = Some(Box::pin(pipeline.dispatch(pending)));
                        }
                        Flow::Quit => accepting = false,
                    },
                    None => accepting = false,
                }
                if !accepting && in_flight.is_some() {
                    writeln!(output, "Waiting for the pending prediction...")?;
                }
            }
        }
        output.flush()?;
    }
    Ok(())
}

async fn next_outcome(in_flight: &mut Option<InFlight<'_>>) -> (PendingSubmission, SubmissionOutcome) {
    match in_flight {
        Some(request) => request.await,
        None => std::future::pending().await,
    }
}

fn handle_line<S, L, W>(session: &mut FormSession<S, L>, line: &str, output: &mut W) -> io::Result<Flow>
where
    S: KeyValueStore,
    L: SessionLogWriter,
    W: Write,
{
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(ParseCommandError::Empty) => return Ok(Flow::Continue),
        Err(err) => {
            writeln!(output, "{err}")?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::Theme => {
            let theme = session.toggle_theme();
            writeln!(output, "Theme: {}", ui::render_theme(theme))?;
        }
        Command::Purpose(purpose) => {
            session.select_purpose(purpose);
            write!(output, "{}", ui::render_form(session))?;
        }
        Command::Set { field, value } => {
            let edited = FieldName::parse(&field)
                .ok_or(FormError::UnknownField(field))
                .and_then(|name| session.edit_field(name, &value).map(|check| (name, check)));
            match edited {
                Ok((name, check)) => {
                    writeln!(output, "{}", ui::render_field_check(name, &check))?;
                    writeln!(output, "Predict: {}", ui::render_submit_state(session))?;
                }
                Err(err) => writeln!(output, "Notice: {err}")?,
            }
        }
        Command::ClearForm => match session.clear_form() {
            Ok(()) => write!(output, "{}", ui::render_form(session))?,
            Err(err) => writeln!(output, "Notice: {err}")?,
        },
        Command::Submit => match session.begin_submission() {
            Ok(pending) => {
                writeln!(output, "Requesting prediction...")?;
                return Ok(Flow::Submit(pending));
            }
            Err(err) => writeln!(output, "Notice: {err}")?,
        },
        Command::Status => {
            write!(output, "{}", ui::render_form(session))?;
            if let Some(display) = session.displayed_prediction() {
                write!(output, "{}", ui::render_prediction(display))?;
            }
        }
        Command::History => write!(output, "{}", ui::render_history(&session.history()))?,
        Command::ToggleHistory => {
            let view = session.toggle_history();
            write!(output, "{}", ui::render_history(&view))?;
        }
        Command::ClearHistory => {
            session.clear_history();
            writeln!(output, "History cleared.")?;
        }
        Command::Help => write!(output, "{}", ui::help_text())?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn report_outcome<S, L, W>(
    session: &mut FormSession<S, L>,
    pending: PendingSubmission,
    outcome: SubmissionOutcome,
    output: &mut W,
) -> io::Result<()>
where
    S: KeyValueStore,
    L: SessionLogWriter,
    W: Write,
{
    match session.complete_submission(pending, outcome) {
        Ok(display) => {
            write!(output, "{}", ui::render_prediction(&display))?;
            write!(output, "{}", ui::render_history(&session.history()))?;
        }
        Err(err) => write!(output, "{}", ui::render_alert(&err))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use api::HttpPredictor;
    use async_trait::async_trait;
    use axum::{routing::post, Json, Router};
    use form_core::{FieldValues, PredictionResult, Purpose};
    use serde_json::json;
    use session::{
        logging::InMemorySessionLog, storage::HISTORY_KEY, FormSession, KeyValueStore,
        MemoryStore, PredictionRequestError, Predictor, SubmissionPipeline,
    };
    use tokio::net::TcpListener;

    use super::{handle_line, run, Flow};

    const FILL_FORM: &str = "set sqft_living 2000
set no_of_bedrooms 3
set no_of_bathrooms 2
set sqft_lot 5000
set no_of_floors 1
set house_age 10
set zipcode 98101
";

    struct FixedPredictor {
        outcome: Result<PredictionResult, PredictionRequestError>,
        yields: usize,
    }

    #[async_trait]
    impl Predictor for FixedPredictor {
        async fn predict(
            &self,
            _values: &FieldValues,
        ) -> Result<PredictionResult, PredictionRequestError> {
            for _ in 0..self.yields {
                tokio::task::yield_now().await;
            }
            self.outcome.clone()
        }
    }

    fn new_session() -> FormSession<MemoryStore, InMemorySessionLog> {
        FormSession::load_with_log(MemoryStore::new(), InMemorySessionLog::new(), None)
    }

    async fn drive<P: Predictor>(
        session: &mut FormSession<MemoryStore, InMemorySessionLog>,
        predictor: P,
        script: &str,
    ) -> String {
        let pipeline = SubmissionPipeline::new(predictor);
        let mut output = Vec::new();
        run(session, &pipeline, script.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn edits_are_rejected_until_a_purpose_is_chosen() {
        let mut session = new_session();
        let predictor = FixedPredictor {
            outcome: Err(PredictionRequestError::Status(500)),
            yields: 0,
        };

        let output = drive(&mut session, predictor, "set sqft_living 2000\nquit\n").await;

        assert!(output.contains("Notice: Please select a purpose (Buying or Selling) first!"));
        assert_eq!(session.form().raw(form_core::FieldName::SqftLiving), "");
    }

    #[tokio::test]
    async fn successful_submission_displays_price_and_records_history() {
        let mut session = new_session();
        let predictor = FixedPredictor {
            outcome: Ok(PredictionResult::new(450_000.0, (420_000.0, 480_000.0))),
            yields: 0,
        };
        let script = format!("buy\n{FILL_FORM}submit\nquit\n");

        let output = drive(&mut session, predictor, &script).await;

        assert!(output.contains("Predict: ready"));
        assert!(output.contains("Estimated home price (Buying): $450,000"));
        assert!(output.contains("$450,000.00"));
        assert_eq!(session.history().total, 1);
    }

    #[tokio::test]
    async fn failed_submission_alerts_and_leaves_history_alone() {
        let mut session = new_session();
        let predictor = FixedPredictor {
            outcome: Err(PredictionRequestError::Status(503)),
            yields: 0,
        };
        let script = format!("sell\n{FILL_FORM}submit\nhistory\nquit\n");

        let output = drive(&mut session, predictor, &script).await;

        assert!(output.contains("Alert: prediction failed."));
        assert!(output.contains("No predictions yet."));
        assert!(session.displayed_prediction().is_none());
    }

    #[tokio::test]
    async fn end_of_input_waits_for_the_pending_prediction() {
        let mut session = new_session();
        let predictor = FixedPredictor {
            outcome: Ok(PredictionResult::new(300_000.0, (280_000.0, 320_000.0))),
            yields: 3,
        };
        let script = format!("buy\n{FILL_FORM}submit\n");

        let output = drive(&mut session, predictor, &script).await;

        assert!(output.contains("Waiting for the pending prediction..."));
        assert!(output.contains("Estimated home price (Buying): $300,000"));
        assert!(!session.submission_in_flight());
    }

    #[test]
    fn commands_stay_available_while_a_request_is_pending() {
        let mut session = new_session();
        let mut output = Vec::new();
        handle_line(&mut session, "buy", &mut output).unwrap();
        for line in FILL_FORM.lines() {
            handle_line(&mut session, line, &mut output).unwrap();
        }
        let first = handle_line(&mut session, "submit", &mut output).unwrap();
        assert!(matches!(first, Flow::Submit(_)));
        output.clear();

        let second = handle_line(&mut session, "submit", &mut output).unwrap();
        handle_line(&mut session, "set no_of_bedrooms 40", &mut output).unwrap();
        handle_line(&mut session, "theme", &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(matches!(second, Flow::Continue));
        assert!(text.contains("Notice: a prediction request is already in progress"));
        assert!(text.contains("no_of_bedrooms: Number of bedrooms must be between 1 and 25."));
        assert!(text.contains("Theme: ☀ Dark Mode"));
    }

    #[test]
    fn unknown_fields_and_commands_are_reported() {
        let mut session = new_session();
        session.select_purpose(Purpose::Buy);
        let mut output = Vec::new();

        handle_line(&mut session, "set garage 2", &mut output).unwrap();
        handle_line(&mut session, "rent", &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Notice: unknown field `garage`"));
        assert!(text.contains("unknown command `rent`, type `help`"));
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn buy_flow_against_http_backend_persists_two_decimal_price() {
        let app = Router::new().route(
            "/",
            post(|| async {
                Json(json!({
                    "predicted_price": 450000,
                    "confidence_interval": [420000, 480000]
                }))
            }),
        );
        let addr = serve(app).await;
        let predictor = HttpPredictor::new(format!("http://{addr}/").parse().unwrap()).unwrap();
        let mut session = new_session();
        let script = format!("buy\n{FILL_FORM}submit\nquit\n");

        let output = drive(&mut session, predictor, &script).await;

        assert!(output.contains("Estimated home price (Buying): $450,000"));
        let stored = session.store().get(HISTORY_KEY).unwrap();
        assert!(stored.contains("\"predicted_price\":\"450000.00\""));
        assert!(stored.contains("\"zipcode\":\"98101\""));
    }
}
