//! Calculation-line preview formatting

use crate::model::LineResult;

/// One display string for a calculation line's result.
///
/// Errors win over values; a bound variable is echoed with its value; a bare
/// expression shows just the value; a calculation still waiting on the
/// evaluator shows nothing.
pub fn format_calc_line(result: &LineResult) -> String {
    if let Some(error) = &result.error {
        return format!("error: {}", error);
    }
    match (&result.variable, &result.value) {
        (Some(variable), Some(value)) => format!("{} = {}", variable, value),
        (None, Some(value)) => value.clone(),
        _ => String::new(),
    }
}
