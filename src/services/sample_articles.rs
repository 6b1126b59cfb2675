use crate::models::RawArticle;

/// Supplies the fixed demonstration articles used when real coverage is unavailable
pub trait SampleArticleProvider: Send + Sync {
    /// The fallback set. Must always hold at least two well-formed articles.
    fn sample_articles(&self, company: &str) -> Vec<RawArticle>;

    /// Companies that always get the sample set, regardless of fetched coverage
    fn is_demo_company(&self, company: &str) -> bool;
}

/// Hardcoded sample pair with a configurable list of demo companies
#[derive(Debug, Clone)]
pub struct StaticSampleProvider {
    demo_companies: Vec<String>,
}

impl StaticSampleProvider {
    pub fn new(demo_companies: Vec<String>) -> Self {
        Self {
            demo_companies: demo_companies
                .into_iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Sample pair without any demo-company override
    pub fn without_demo_companies() -> Self {
        Self::new(Vec::new())
    }
}

impl SampleArticleProvider for StaticSampleProvider {
    fn sample_articles(&self, _company: &str) -> Vec<RawArticle> {
        vec![
            RawArticle::new(
                "Tesla's New Model Breaks Sales Records",
                "Tesla's latest EV sees record sales in Q3...",
                "Tesla's new model has broken sales records in Q3 due to its innovative design and efficiency.",
            ),
            RawArticle::new(
                "Regulatory Scrutiny on Tesla's Self-Driving Tech",
                "Regulators have raised concerns over Tesla's self-driving software...",
                "Regulators are examining Tesla's self-driving software amid safety concerns and potential legal challenges.",
            ),
        ]
    }

    fn is_demo_company(&self, company: &str) -> bool {
        let company = company.trim().to_lowercase();
        self.demo_companies.iter().any(|c| *c == company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_pair_is_well_formed() {
        let provider = StaticSampleProvider::without_demo_companies();
        let samples = provider.sample_articles("Acme");
        assert_eq!(samples.len(), 2);
        for article in &samples {
            assert!(!article.title.is_empty());
            assert!(!article.summary.is_empty());
            assert!(!article.content.is_empty());
        }
        assert_eq!(samples, provider.sample_articles("Globex"));
    }

    #[test]
    fn test_demo_company_match_is_case_insensitive() {
        let provider = StaticSampleProvider::new(vec!["Tesla".to_string(), " ".to_string()]);
        assert!(provider.is_demo_company("tesla"));
        assert!(provider.is_demo_company("  TESLA "));
        assert!(!provider.is_demo_company("Acme"));
        assert!(!provider.is_demo_company(""));
    }
}
