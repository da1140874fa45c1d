use serde_json::Value;

/// Builds the single prompt sent upstream. Questions are embedded as a JSON
/// array so the model sees their exact text and order.
pub fn build_prompt(questions: &[String]) -> String {
    let questions_json = Value::from(questions.to_vec()).to_string();

    format!(
        "You are given an image and a list of questions about it. \
         Answer each question based on what you can see in the image.\n\
         Respond with ONLY a JSON array of {count} strings, one answer per question, \
         in the same order as the questions. Do not include any other text.\n\n\
         Questions:\n{questions_json}",
        count = questions.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_questions_as_json() {
        let questions = vec![
            "What is in the picture?".to_string(),
            "Is it \"indoors\"?".to_string(),
        ];

        let prompt = build_prompt(&questions);

        assert!(prompt.contains(r#"["What is in the picture?","Is it \"indoors\"?"]"#));
        assert!(prompt.contains("JSON array of 2 strings"));
    }
}
