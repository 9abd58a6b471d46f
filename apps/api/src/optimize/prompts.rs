//! Prompt composition for the optimization call.
//!
//! The prompt mandates two literal delimiter lines the model must echo back
//! verbatim; the résumé delimiter embeds the company name so the splitter has
//! a deterministic anchor string. No field validation happens here — empty
//! optional fields pass through as empty strings.

use crate::models::UserInput;

/// System instruction sent with every optimization call.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert Recruitment and Resume Tailoring AI with deep knowledge of the hiring practices of top global technology companies.
Your goal is to help candidates optimize their resumes to pass ATS (Applicant Tracking Systems) and impress hiring managers at specific target companies.

When analyzing a resume, you must:
1. Identify the gaps between the candidate's current profile and the target role/company culture.
2. Rewrite content to be action-oriented, quantifiable, and culturally aligned with the target company.
3. Prioritize achievements over responsibilities.
4. Use the specific keywords and terminology favored by the target company.

You must output your response in a structured way that separates the Tailored Resume from the Company Strategy.
";

/// Marker line introducing the strategy section. Literal; the model must
/// reproduce it exactly for the splitter to find it.
pub const STRATEGY_DELIMITER: &str = "===== Company Target Strategy =====";

/// Marker line introducing the résumé section, interpolated with the target
/// company so the anchor is unambiguous even if the model restates the prompt.
pub fn resume_delimiter(company: &str) -> String {
    format!("===== Tailored Resume for {company} =====")
}

/// Builds the full instruction text for one submission.
pub fn compose_prompt(input: &UserInput) -> String {
    format!(
        r#"I am targeting a role at **{company}**.

My details:
- Target Role: {role}
- Level: {level}
- Key Skills: {skills}
- Additional Context: {notes}

Please perform the following tasks based on my attached resume PDF:

1. **Tailored Resume Generation**: Rewrite my resume to be fully optimized for {company}.
   - Align with {company}'s specific culture and values.
   - Use their preferred language style.
   - Focus on measurable impact.
   - Ensure it is ATS friendly.
   - Do NOT invent experiences, but reframe existing ones to match the target.
   - Structure it professionally (Summary, Skills, Experience, Education, etc.).

2. **Company Strategy Guide**: Create a specific guide for landing this job at {company}.
   - What specific culture fit keywords should I emphasize?
   - What technical stack is most critical?
   - How should I position myself in the interview?
   - What are their specific hiring values?

**Output Format Requirement:**
Please separate the two sections clearly with the following delimiters:

{resume_delimiter}
(The full markdown resume content goes here)

{strategy_delimiter}
(The strategy guide content goes here)
"#,
        company = input.company,
        role = input.role,
        level = input.level,
        skills = input.skills,
        notes = input.notes,
        resume_delimiter = resume_delimiter(&input.company),
        strategy_delimiter = STRATEGY_DELIMITER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_fields_and_exact_delimiters() {
        let input = UserInput {
            company: "Google".to_string(),
            role: "Senior Frontend Engineer".to_string(),
            level: "Senior".to_string(),
            skills: "React, TypeScript".to_string(),
            notes: String::new(),
            file: None,
        };

        let prompt = compose_prompt(&input);
        assert!(prompt.contains("Google"));
        assert!(prompt.contains("Senior Frontend Engineer"));
        assert!(prompt.contains("React, TypeScript"));
        assert!(prompt.contains("===== Tailored Resume for Google ====="));
        assert!(prompt.contains("===== Company Target Strategy ====="));
    }

    #[test]
    fn test_empty_optional_fields_pass_through() {
        let input = UserInput {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            ..Default::default()
        };
        let prompt = compose_prompt(&input);
        assert!(prompt.contains("- Key Skills: \n"));
        assert!(prompt.contains("- Additional Context: \n"));
    }

    #[test]
    fn test_resume_delimiter_interpolates_company() {
        assert_eq!(
            resume_delimiter("Stripe"),
            "===== Tailored Resume for Stripe ====="
        );
    }
}
