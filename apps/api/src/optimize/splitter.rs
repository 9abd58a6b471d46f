//! Delimiter-based response splitting.
//!
//! Best-effort textual contract, not a strict grammar: the model is asked to
//! echo the two delimiter lines verbatim, but its compliance is not
//! guaranteed. The splitter therefore never fails — when the delimiters are
//! missing, malformed, or out of order, the entire raw text becomes the
//! résumé and the strategy falls back to a fixed message.

use crate::models::OptimizationResult;
use crate::optimize::prompts::{resume_delimiter, STRATEGY_DELIMITER};

/// Shown in place of the strategy when the response could not be split.
pub const STRATEGY_FALLBACK: &str =
    "Could not parse strategy section separately. Please check the full output.";

/// Splits the raw response text into (résumé, strategy) using the delimiters
/// composed for `company`. Always returns a valid result.
pub fn split_response(full_text: &str, company: &str) -> OptimizationResult {
    let resume_marker = resume_delimiter(company);

    let resume_start = full_text.find(&resume_marker);
    let strategy_start = full_text.find(STRATEGY_DELIMITER);

    if let (Some(resume_idx), Some(strategy_idx)) = (resume_start, strategy_start) {
        let resume_end = resume_idx + resume_marker.len();
        // Out-of-order delimiters would slice backwards; treat like absence.
        if resume_end <= strategy_idx {
            return OptimizationResult {
                resume: full_text[resume_end..strategy_idx].trim().to_string(),
                strategy: full_text[strategy_idx + STRATEGY_DELIMITER.len()..]
                    .trim()
                    .to_string(),
            };
        }
    }

    OptimizationResult {
        resume: full_text.to_string(),
        strategy: STRATEGY_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_well_formed_response() {
        let raw = "===== Tailored Resume for Acme =====\nResume text\n===== Company Target Strategy =====\nStrategy text";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, "Resume text");
        assert_eq!(result.strategy, "Strategy text");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let raw = "preamble the model added\n===== Tailored Resume for Acme =====\n\n  # John Doe\nExperience...\n\n===== Company Target Strategy =====\n\n  ## Strategy\nEmphasize ownership.\n\n";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, "# John Doe\nExperience...");
        assert_eq!(result.strategy, "## Strategy\nEmphasize ownership.");
    }

    #[test]
    fn test_missing_both_delimiters_falls_back() {
        let raw = "The model ignored the format and wrote freely.";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, raw);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_missing_strategy_delimiter_falls_back_completely() {
        // Partial match behaves exactly like full absence.
        let raw = "===== Tailored Resume for Acme =====\nResume only, no strategy section.";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, raw);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_missing_resume_delimiter_falls_back_completely() {
        let raw = "Some text\n===== Company Target Strategy =====\nStrategy without resume marker.";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, raw);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_wrong_company_in_delimiter_falls_back() {
        let raw = "===== Tailored Resume for Globex =====\nResume\n===== Company Target Strategy =====\nStrategy";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, raw);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_empty_response_falls_back() {
        let result = split_response("", "Acme");
        assert_eq!(result.resume, "");
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_out_of_order_delimiters_fall_back() {
        let raw = "===== Company Target Strategy =====\nStrategy first?\n===== Tailored Resume for Acme =====\nResume last.";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, raw);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
    }

    #[test]
    fn test_reconstruction_preserves_delimiter_order() {
        let resume_part = "Resume body";
        let strategy_part = "Strategy body";
        let raw = format!(
            "{}\n{}\n{}\n{}",
            resume_delimiter("Acme"),
            resume_part,
            STRATEGY_DELIMITER,
            strategy_part
        );
        let result = split_response(&raw, "Acme");

        let rebuilt = format!(
            "{}\n{}\n{}\n{}",
            resume_delimiter("Acme"),
            result.resume,
            STRATEGY_DELIMITER,
            result.strategy
        );
        let resume_idx = rebuilt.find(&resume_delimiter("Acme")).unwrap();
        let strategy_idx = rebuilt.find(STRATEGY_DELIMITER).unwrap();
        assert!(resume_idx < strategy_idx);
        assert_eq!(rebuilt, raw);
    }

    #[test]
    fn test_empty_sections_between_delimiters() {
        let raw = "===== Tailored Resume for Acme =====\n===== Company Target Strategy =====";
        let result = split_response(raw, "Acme");
        assert_eq!(result.resume, "");
        assert_eq!(result.strategy, "");
    }
}
