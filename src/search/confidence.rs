use crate::models::Faq;

/// Average, over the matched FAQs, of the fraction of keywords that appear
/// in each FAQ's question + answer text. Clamped to `[0, 1]`; zero when
/// either input is empty.
pub fn score(faqs: &[Faq], keywords: &[String]) -> f32 {
    if faqs.is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let total: f32 = faqs
        .iter()
        .map(|faq| {
            let text = format!("{} {}", faq.question, faq.answer).to_lowercase();
            let present = keywords
                .iter()
                .filter(|k| text.contains(&k.to_lowercase()))
                .count();
            present as f32 / keywords.len() as f32
        })
        .sum();

    (total / faqs.len() as f32).clamp(0.0, 1.0)
}

/// Two decimal places, as reported to clients. A non-zero score never rounds
/// down to zero.
pub fn round(confidence: f32) -> f32 {
    let confidence = confidence.clamp(0.0, 1.0);
    let rounded = (confidence * 100.0).round() / 100.0;
    if confidence > 0.0 && rounded == 0.0 {
        0.01
    } else {
        rounded
    }
}
