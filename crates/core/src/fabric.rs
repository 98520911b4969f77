//! Fabric advisor prompts and the predefined sustainability questions.

use crate::generation::Classification;

/// How many classifier labels feed the analysis prompt.
pub const TOP_LABELS: usize = 5;

/// Maximum accepted length for a custom question.
pub const MAX_QUESTION_LENGTH: usize = 500;

pub const SUSTAINABILITY_QUESTIONS: &[&str] = &[
    "How can I reuse this fabric?",
    "What are some eco-friendly alternatives to this fabric?",
    "How can I make this fabric more sustainable?",
    "What are the best practices for caring for this fabric sustainably?",
    "How can I recycle or upcycle items made from this fabric?",
    "What is the environmental impact of this fabric?",
    "How can I reduce water usage when cleaning this fabric?",
    "Are there any certifications I should look for when buying this type of fabric?",
    "How can I extend the lifespan of items made from this fabric?",
    "What are some sustainable dyeing options for this fabric?",
    "How does the production of this fabric impact local communities?",
    "What are some innovative sustainable technologies being used with this type of fabric?",
    "How can I shop more responsibly for this type of fabric?",
    "What are some common misconceptions about the sustainability of this fabric?",
    "How can I advocate for more sustainable practices in the production of this fabric?",
];

/// Render classifications as `"label (12.34%)"` joined by `", "`.
pub fn describe_classifications(classifications: &[Classification]) -> String {
    classifications
        .iter()
        .take(TOP_LABELS)
        .map(|c| format!("{} ({:.2}%)", c.label, c.probability * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn analysis_prompt(description: &str) -> String {
    format!(
        "Based on this fabric description: {description}\n\
         Provide a brief analysis of the fabric's composition and key properties:\n\
         - Estimated composition (e.g., \"70% Cotton, 30% Polyester\")\n\
         - Texture\n\
         - Durability\n\
         - Breathability\n\
         Format as a short paragraph, focusing on the most likely characteristics."
    )
}

pub fn answer_prompt(question: &str, fabric_analysis: &str) -> String {
    format!(
        "Given this fabric analysis: {fabric_analysis}\n\n\
         Answer the following question about sustainable fashion:\n\
         {question}\n\n\
         Provide a concise, practical answer focusing on sustainability and environmental impact."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str, probability: f64) -> Classification {
        Classification {
            label: label.to_string(),
            probability,
        }
    }

    #[test]
    fn description_formats_percentages() {
        let text = describe_classifications(&[label("wool", 0.5234), label("velvet", 0.01)]);
        assert_eq!(text, "wool (52.34%), velvet (1.00%)");
    }

    #[test]
    fn description_keeps_top_five() {
        let many: Vec<_> = (0..8).map(|i| label(&format!("l{i}"), 0.1)).collect();
        assert_eq!(describe_classifications(&many).matches('%').count(), TOP_LABELS);
    }

    #[test]
    fn fifteen_predefined_questions() {
        assert_eq!(SUSTAINABILITY_QUESTIONS.len(), 15);
    }

    #[test]
    fn answer_prompt_embeds_question_and_analysis() {
        let prompt = answer_prompt("How can I reuse this fabric?", "Mostly cotton.");
        assert!(prompt.starts_with("Given this fabric analysis: Mostly cotton."));
        assert!(prompt.contains("\nHow can I reuse this fabric?\n"));
    }
}
