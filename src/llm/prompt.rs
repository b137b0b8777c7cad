use std::fmt::Write;

use crate::models::Faq;

/// Longest user question forwarded to the model, in characters.
pub const MAX_QUERY_LEN: usize = 1000;

const CONTROL_TOKENS: &[&str] = &["<|im_start|>", "<|im_end|>", "<|endoftext|>"];

/// Strip chat-template control tokens so user or FAQ text cannot open a new
/// role turn. Repeats until stable: removing an inner token must not leave a
/// new one behind.
pub fn sanitize_for_prompt(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let next = CONTROL_TOKENS
            .iter()
            .fold(out.clone(), |acc, token| acc.replace(token, ""));
        if next == out {
            return out;
        }
        out = next;
    }
}

/// First `max_chars` characters of `s`.
pub fn truncate_to_char_boundary(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

/// Question text as it is sent to the model.
pub fn prepare_query(query: &str) -> String {
    sanitize_for_prompt(&truncate_to_char_boundary(query.trim(), MAX_QUERY_LEN))
}

pub fn build_system_prompt(support_contact: &str) -> String {
    format!(
        "You are a friendly customer support assistant.\n\
         Answer ONLY using the FAQ entries included in the user's message. Never use outside knowledge.\n\
         - If an FAQ answers the question exactly, reply with its answer, rephrased slightly.\n\
         - If the FAQs only partly cover the question, reply in at most 2 lines, then add: \
         \"For more details, please contact {support_contact}.\"\n\
         - If the question is related to the FAQs, you may combine several entries into one answer.\n\
         - If no FAQ is relevant, say you don't have that information and add: \
         \"Please contact {support_contact} for help.\"\n\
         Keep the answer short and do not mention that you were given FAQs."
    )
}

pub fn build_context_block(faqs: &[Faq]) -> String {
    let mut ctx = String::from("FAQ entries:\n\n");

    if faqs.is_empty() {
        ctx.push_str("(No FAQ entries are available.)\n");
        return ctx;
    }

    for (i, faq) in faqs.iter().enumerate() {
        let category = if faq.category.is_empty() {
            "general"
        } else {
            faq.category.as_str()
        };
        // Writing into a String cannot fail.
        let _ = write!(
            ctx,
            "{}. [{}]\nQ: {}\nA: {}\n\n",
            i + 1,
            category,
            sanitize_for_prompt(&faq.question),
            sanitize_for_prompt(&faq.answer),
        );
    }

    ctx
}

/// The user turn: context first, so smaller models attend to it, then the
/// question.
pub fn build_user_message(context: &str, query: &str) -> String {
    format!("{context}---\nCustomer question: {query}")
}
