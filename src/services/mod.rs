pub mod ai_service;
pub mod blob_service;
pub mod extract_service;
pub mod generation_service;
pub mod grading_service;
pub mod quiz_service;
