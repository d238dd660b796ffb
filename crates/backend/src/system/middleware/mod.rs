pub mod correlation;
pub mod problem_details;
pub mod request_logger;
pub mod security_headers;
