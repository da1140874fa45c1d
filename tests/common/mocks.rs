use async_trait::async_trait;
use image_qa::{
    Error, Result,
    llm::{VisionClient, VisionRequest},
};
use std::sync::{Arc, Mutex};

/// Mock vision client that replays a canned reply and records every request.
#[derive(Debug, Clone)]
pub struct MockVisionClient {
    pub reply: Option<String>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<VisionRequest>>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            reply: None,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_requests(&self) -> Vec<VisionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn complete(&self, request: VisionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        self.reply
            .clone()
            .ok_or_else(|| Error::llm("No mock reply configured"))
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}
