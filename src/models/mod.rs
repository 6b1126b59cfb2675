mod article;
mod report;

pub use article::{Article, ArticleInput, RawArticle, Sentiment, PLACEHOLDER_SUMMARY, PLACEHOLDER_TITLE};
pub use report::{
    AnalysisReport, AnalysisResponse, AnalyzeRequest, ComparativeReport, ComparativeSentimentScore,
    CoverageDifference, ReportRequest, SentimentDistribution, TopicOverlap,
};
