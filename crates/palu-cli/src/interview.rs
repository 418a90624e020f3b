//! Guided terminal interview.

use std::io::{BufRead, Write};

use palu_core::models::result::EngineResult;
use palu_core::symptoms::{SymptomKey, ValueKind};
use palu_triage::service::{AnswerResponse, FinalResponse, TriageService};
use palu_triage::session::StartParams;
use palu_triage::store::{DiagnosticStore, SessionStore};

/// Ask questions on `output`, read answers from `input`, until the session
/// completes. Rejected answers are reported and the same question is asked
/// again.
pub async fn run_interview<S, D, R, W>(
    service: &TriageService<S, D>,
    params: StartParams,
    input: &mut R,
    output: &mut W,
) -> eyre::Result<FinalResponse>
where
    S: SessionStore,
    D: DiagnosticStore,
    R: BufRead,
    W: Write,
{
    let started = service.start(params).await?;
    writeln!(output, "Session {}", started.session_id)?;

    let mut question = started
        .question
        .ok_or_else(|| eyre::eyre!("no question to ask"))?;

    loop {
        write!(output, "{} {} ", question.prompt(), hint(question))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(eyre::eyre!(
                "input closed before the interview completed (session {})",
                started.session_id
            ));
        }
        let raw = serde_json::Value::String(line.trim().to_string());

        let response = match service.answer(started.session_id, question.as_str(), &raw).await {
            Ok(response) => response,
            Err(e) if e.is_validation() => {
                writeln!(output, "  ! {e}")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match response {
            AnswerResponse::Preview(preview) => {
                if !preview.danger_signs.is_empty() {
                    writeln!(output, "  ! signes de danger: {}", join(&preview.danger_signs))?;
                }
                if let Some(top) = preview.preview_hypotheses.first() {
                    writeln!(output, "  > {} ({:.2})", top.label, top.score)?;
                }
                question = preview
                    .next_question
                    .ok_or_else(|| eyre::eyre!("session open but no question left"))?;
            }
            AnswerResponse::Final(done) => {
                write_summary(output, &done.final_output)?;
                if let Some(err) = &done.diagnostic_error {
                    writeln!(output, "  ! diagnostic non enregistré: {err}")?;
                }
                return Ok(done);
            }
        }
    }
}

/// Human-readable summary of a final result.
pub fn write_summary<W: Write>(output: &mut W, result: &EngineResult) -> std::io::Result<()> {
    writeln!(output)?;
    for h in &result.hypotheses {
        writeln!(output, "  {:<24} {:.2}", h.label, h.score)?;
    }
    if !result.danger_signs.is_empty() {
        writeln!(output, "  Signes de danger: {}", join(&result.danger_signs))?;
    }
    writeln!(output, "  {}", result.recommendation)?;
    if let Some(d) = &result.dosage {
        match d.total_tablets {
            Some(total) => writeln!(
                output,
                "  {}: {} cp x {}/jour pendant {} jours ({total} cp)",
                d.regimen, d.tablets_per_dose, d.doses_per_day, d.days
            )?,
            None => writeln!(output, "  {}", d.regimen)?,
        }
    }
    Ok(())
}

fn hint(key: SymptomKey) -> &'static str {
    match key.kind() {
        ValueKind::Bool => "[oui/non]",
        ValueKind::Number => "[nombre]",
    }
}

fn join(keys: &[SymptomKey]) -> String {
    keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
}
