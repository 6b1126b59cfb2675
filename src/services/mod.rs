pub mod comparator;
pub mod failure_cache;
pub mod news_service;
pub mod report_service;
pub mod sample_articles;
pub mod sentiment_classifier;
pub mod speech_service;
pub mod topic_extractor;
