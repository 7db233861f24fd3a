use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use wayfare_core::{parse_reply, GenerationReply, Generator, Recommender, RecommenderBuilder};

/// Generator that answers with a fixed raw reply, parsed like a live one.
pub struct FixedReply(pub &'static str);

#[async_trait]
impl Generator for FixedReply {
    async fn generate(&self, _prompt: &str) -> wayfare_core::Result<GenerationReply> {
        parse_reply(self.0)
    }
}

/// Helper function to create a test recommender
pub async fn create_test_recommender(reply: &'static str) -> (TempDir, Recommender) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let recommender = RecommenderBuilder::new()
        .with_database_path(Some(&db_path))
        .with_generator(Arc::new(FixedReply(reply)))
        .build()
        .await
        .expect("Failed to create recommender");
    (temp_dir, recommender)
}
