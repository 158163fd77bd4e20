pub mod health_handler;
pub mod leaderboard_handler;
pub mod page_handler;
pub mod quiz_handler;

use actix_web::web;

pub use health_handler::health_check;
pub use leaderboard_handler::{get_results, save_results, update_leaderboard};
pub use page_handler::{index_page, leaderboard_page, quiz_page};
pub use quiz_handler::{current_quiz_data, get_quiz, upload};

/// Registers every route of the quiz front end.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index_page)
        .service(quiz_page)
        .service(leaderboard_page)
        .service(upload)
        .service(current_quiz_data)
        .service(get_quiz)
        .service(save_results)
        .service(get_results)
        .service(update_leaderboard)
        .service(health_check);
}
