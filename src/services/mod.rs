pub mod generation_service;
pub mod question_generator;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod session_service;
pub mod stats_service;
