//! Prompt construction and response parsing for the interview loop.

use parley_core::{InterviewRole, InterviewRound};
use parley_gateway::ChatMessage;

const QUESTION_SYSTEM_PROMPT: &str =
    "You are a professional AI interviewer tasked with generating interview questions.";

const FEEDBACK_SYSTEM_PROMPT: &str = "You are a professional AI interviewer tasked with \
     providing constructive feedback to candidates and asking follow-up questions.";

/// Build the message list asking the model for one bare interview question.
pub fn question_messages(role: InterviewRole, round: InterviewRound) -> Vec<ChatMessage> {
    let prompt = format!(
        "As an experienced interviewer for a {role} role, please generate a concise and \
         professional {round} interview question.\n\
         Ensure the question is:\n\
         - Directly relevant to the {role} role.\n\
         - Appropriate for a {round} round (e.g., if technical, ask a coding/design/conceptual \
         question; if behavioral, ask about experience/skills).\n\
         - Clear, unambiguous, and encouraging of a detailed answer.\n\
         - Just provide the question text itself, without any introductory phrases like \
         \"Question:\" or \"Here's your question:\".\n\n\
         Example for SDE Technical: \"Explain the concept of multithreading and its challenges \
         in Python.\"\n\
         Example for HR Behavioral: \"Describe a time you had to deal with a difficult \
         colleague. How did you handle the situation?\"\n"
    );

    vec![
        ChatMessage::system(QUESTION_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

/// Build the message list asking for feedback on `answer` plus a follow-up
/// question for the same role and round.
pub fn feedback_messages(
    role: InterviewRole,
    round: InterviewRound,
    question: &str,
    answer: &str,
) -> Vec<ChatMessage> {
    let prompt = format!(
        "As an experienced interviewer for a {role} role, you have asked the following {round} \
         question:\n\n\
         Question: \"{question}\"\n\n\
         The candidate provided the following answer:\n\
         Answer: \"{answer}\"\n\n\
         Please provide constructive feedback on this answer. Your feedback should:\n\
         - Identify strengths in the answer.\n\
         - Point out areas for improvement.\n\
         - Offer suggestions for how the candidate could improve their response.\n\
         - Be professional, encouraging, and actionable.\n\
         - Limit the feedback to a concise paragraph or two.\n\
         After providing feedback, ask a new, follow-up question for the same role and round, \
         introduced on its own line as \"Next Question:\".\n"
    );

    vec![
        ChatMessage::system(FEEDBACK_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

/// Split a combined feedback response at a blank line followed by a
/// `Next Question:` or `Follow-up Question:` marker (case-insensitive).
///
/// Returns the feedback text and, when the marker was found with non-empty
/// text after it, the extracted next question. Best effort: the model is not
/// guaranteed to honor the delimiter convention, in which case the whole
/// response is feedback.
pub fn split_feedback(full: &str) -> (String, Option<String>) {
    const MARKERS: [&str; 2] = ["\n\nnext question:", "\n\nfollow-up question:"];

    let hit = MARKERS
        .iter()
        .filter_map(|marker| find_ignore_ascii_case(full, marker).map(|at| (at, marker.len())))
        .min_by_key(|(at, _)| *at);

    match hit {
        Some((at, marker_len)) => {
            let feedback = full[..at].trim().to_string();
            let question = full[at + marker_len..].trim();
            if question.is_empty() {
                (feedback, None)
            } else {
                (feedback, Some(question.to_string()))
            }
        }
        None => (full.trim().to_string(), None),
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&at| haystack[at..at + needle.len()].eq_ignore_ascii_case(needle))
}
