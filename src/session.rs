//! Line-oriented query session over a shared, read-only context

use crate::context::AppContext;
use crate::data::parse_percentage;
use std::io::{BufRead, Write};

/// Answer one percentage per input line until EOF or `quit`/`exit`
///
/// Unparseable or out-of-range lines are reported and the session continues.
///
/// # Returns
/// * Number of queries answered with a category
pub fn run_session<R: BufRead, W: Write>(ctx: &AppContext, input: R, mut output: W) -> crate::Result<usize> {
    let mut answered = 0;

    writeln!(output, "Masukkan persentase (0-100), atau 'quit' untuk keluar")?;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        let Some(value) = parse_percentage(query) else {
            writeln!(output, "error: '{}' is not a number", query)?;
            continue;
        };

        match ctx.predict(value) {
            Ok(prediction) => {
                answered += 1;
                tracing::debug!(percentage = value, predicted = %prediction.predicted, "answered query");
                writeln!(
                    output,
                    "{:.2} -> {} (threshold: {})",
                    prediction.percentage, prediction.predicted, prediction.threshold
                )?;
            }
            Err(err) => writeln!(output, "error: {}", err)?,
        }
    }

    Ok(answered)
}
