//! Prompt templates used by the workflow stages.

use crate::domain::question::Question;

/// System instruction for the answering conversation.
pub(crate) const ANSWER_SYSTEM_INSTRUCTION: &str = "You are a general-purpose \
assistant answering benchmark questions. Use the available tools whenever the \
question needs information you do not have. Think step by step, then finish \
your reply with a line of the form:\n\nFINAL ANSWER: <answer>\n\nThe answer \
should be a number, as few words as possible, or a comma-separated list of \
numbers and/or strings. Do not use units, abbreviations, or articles unless \
the question asks for them.";

/// Builds the initial user turn for a question.
pub(crate) fn initial_prompt(question: &Question) -> String {
    question.question.clone()
}

/// Builds the narrow extraction prompt for the second model pass.
///
/// No persona, no tools: the only instruction is to reduce the draft to the
/// literal answer the scorer compares against.
pub(crate) fn extraction_prompt(question: &Question, draft: &str) -> String {
    format!(
        "The text below is a draft reply to the question:\n\n{question}\n\n\
         Draft reply:\n{draft}\n\n\
         Extract the final answer from the draft. Respond with ONLY the \
         answer itself: no explanation, no labels, no surrounding punctuation.",
        question = question.question,
        draft = draft,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_prompt_is_the_question_text() {
        let question = Question::new("t1", "What is 2+2?");
        assert_eq!(initial_prompt(&question), "What is 2+2?");
    }

    #[test]
    fn extraction_prompt_embeds_question_and_draft() {
        let question = Question::new("t1", "What is 2+2?");
        let prompt = extraction_prompt(&question, "The sum is 4. FINAL ANSWER: 4");
        assert!(prompt.contains("What is 2+2?"));
        assert!(prompt.contains("FINAL ANSWER: 4"));
        assert!(prompt.contains("ONLY"));
    }
}
