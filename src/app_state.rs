use std::sync::Arc;

use chrono::Duration;

use crate::{
    config::Config,
    repositories::{InMemoryQuizRepository, InMemoryResultRepository},
    services::{
        leaderboard_service::LeaderboardService,
        model_service::{CompletionClient, OpenAiCompletionClient},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completion_client = OpenAiCompletionClient::from_config(&config)
            .map(|client| Arc::new(client) as Arc<dyn CompletionClient>);

        if completion_client.is_none() {
            log::warn!("GROQ_API_KEY is not set; uploads will be rejected until it is configured");
        }

        Self::with_completion_client(config, completion_client)
    }

    pub fn with_completion_client(
        config: Config,
        completion_client: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        let session_ttl = Duration::minutes(config.session_ttl_minutes);

        let quiz_repository = Arc::new(InMemoryQuizRepository::new());
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            completion_client,
            session_ttl,
        ));

        let result_repository = Arc::new(InMemoryResultRepository::new());
        let leaderboard_service = Arc::new(LeaderboardService::new(result_repository, session_ttl));

        Self {
            quiz_service,
            leaderboard_service,
            config: Arc::new(config),
        }
    }
}
