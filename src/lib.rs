pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    ai_service::AIService, blob_service::BlobService, generation_service::GenerationService,
    quiz_service::QuizService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quiz_service: QuizService,
    pub blob_service: BlobService,
    pub generation_service: GenerationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.ai_timeout_secs))
            .build()
            .unwrap();

        let quiz_service = QuizService::new(pool.clone());
        let blob_service = BlobService::new(pool.clone());
        let ai_service = AIService::new(
            config.openai_api_key.clone(),
            http_client,
            config.ai_timeout_secs,
        );
        let generation_service = GenerationService::new(
            ai_service,
            blob_service.clone(),
            quiz_service.clone(),
        );

        Self {
            pool,
            quiz_service,
            blob_service,
            generation_service,
        }
    }
}
