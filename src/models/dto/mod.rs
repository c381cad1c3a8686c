pub mod quiz_file;
pub mod request;
pub mod response;
