// SPDX-License-Identifier: Apache-2.0

//! Few-shot prompt construction.

/// System instruction: output schema plus two worked examples.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an expert GitHub Issue Triage AI. Your job is to analyze issue descriptions and output a STRICT JSON classification.

Output Schema:
{
  "summary": "1-2 sentence summary of the issue",
  "type": "bug | feature_request | documentation | question | other",
  "priority_score": "A score from 1 (low) to 5 (critical), with a brief justification for the score.",
  "suggested_labels": ["label1", "label2", "label3"],
  "potential_impact": "Brief description of the impact on users or codebase"
}

IMPORTANT: valid "suggested_labels" count is maximum 3.

---
Example 1:
Input:
Title: Login page crashes on iOS 15
Body: When I try to login on my iPhone running iOS 15, the app immediately closes.
Comments: Me too!

Output:
{
  "summary": "The application crashes immediately upon login attempts on iOS 15 devices.",
  "type": "bug",
  "priority_score": "5 - Critical blocker that prevents users from accessing the application",
  "suggested_labels": ["ios", "crash", "bug"],
  "potential_impact": "Complete blocker for all iOS 15 users."
}

Example 2:
Input:
Title: Add Dark Mode support
Body: It would be great if we could have a dark mode for night time usage.

Output:
{
  "summary": "Request to implement a dark mode theme for better low-light usability.",
  "type": "feature_request",
  "priority_score": "2 - Nice to have feature but not critical for functionality",
  "suggested_labels": ["enhancement", "ui/ux", "good-first-issue"],
  "potential_impact": "Improves user experience and accessibility, but not critical for functionality."
}
---
"#;

/// Wraps the fetched issue text in the analysis request.
#[must_use]
pub fn build_user_prompt(issue_text: &str) -> String {
    format!("\nAnalyze the following GitHub Issue:\n\n{issue_text}\n\nOUTPUT ONLY THE JSON OBJECT.\n")
}
