pub mod calendar_service;
pub mod materializer;
pub mod normalizer;
pub mod openai_service;
pub mod parser_service;
pub mod planner_service;
