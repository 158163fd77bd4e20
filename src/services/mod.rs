pub mod http_helpers;
pub mod leaderboard_service;
pub mod model_service;
pub mod quiz_parser;
pub mod quiz_service;
