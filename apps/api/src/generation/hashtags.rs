const STOCK_HASHTAGS: &[&str] = &["#LinkedIn", "#ProfessionalGrowth", "#CareerDevelopment"];

/// LinkedIn's post length limit, in characters.
pub const LINKEDIN_CHAR_LIMIT: usize = 3000;

/// Topic hashtag followed by a few stock ones. Whitespace is stripped from the topic.
pub fn suggest_hashtags(topic: &str) -> Vec<String> {
    let topic_tag: String = topic.chars().filter(|c| !c.is_whitespace()).collect();
    std::iter::once(format!("#{topic_tag}"))
        .chain(STOCK_HASHTAGS.iter().map(|t| t.to_string()))
        .collect()
}

pub fn char_count(content: &str) -> usize {
    content.chars().count()
}
