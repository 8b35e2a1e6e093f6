// Application layer - Use cases over the sample repository
pub mod sample_repository;
pub mod streaming_service;
pub mod timeline_service;
