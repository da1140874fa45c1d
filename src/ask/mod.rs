//! Question answering over a single image.
//!
//! Everything here except [`answer_questions`] is pure string handling, so
//! the parsing rules can be exercised without an upstream model.

mod answers;
mod prompt;
mod types;

pub use answers::*;
pub use prompt::*;
pub use types::*;

use crate::{
    Result,
    llm::{ImageInput, VisionClient, VisionRequest},
};
use tracing::{debug, info};

/// Asks the model every question in one upstream call and pairs each
/// question with its answer, in input order.
pub async fn answer_questions(
    client: &dyn VisionClient,
    image: ImageInput,
    questions: Vec<String>,
    system_prompt: Option<String>,
) -> Result<Vec<QaPair>> {
    let request = VisionRequest {
        prompt: build_prompt(&questions),
        image,
        system_prompt,
    };

    let reply = client.complete(request).await?;
    debug!(reply_len = reply.len(), "Model replied");

    let answers = extract_answers(&reply);
    if answers.len() != questions.len() {
        info!(
            expected = questions.len(),
            received = answers.len(),
            "Answer count differs from question count, reconciling"
        );
    }

    Ok(pair_up(questions, answers))
}
