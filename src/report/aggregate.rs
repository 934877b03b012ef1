// Per-topic and corpus-level aggregation.
//
// Grouping is strictly by the already-computed topic assignment and
// sentiment category. Unassigned documents are excluded from every
// topic-keyed figure here; they still appear in the raw per-document
// export. All orderings are fixed (ascending topic id, the declared
// category order) so identical input always produces identical tables.

use serde::Serialize;

use crate::document::Document;
use crate::sentiment::SentimentCategory;

/// Document counts per sentiment category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub unknown: usize,
}

impl CategoryCounts {
    pub fn add(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Neutral => self.neutral += 1,
            SentimentCategory::Negative => self.negative += 1,
            SentimentCategory::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.unknown
    }

    /// Proportion per category in the fixed order. Zero-count categories
    /// contribute 0.0 rather than being omitted; over a non-empty group
    /// the proportions sum to 1 within floating tolerance.
    pub fn proportions(&self) -> [(SentimentCategory, f64); 4] {
        let total = self.total();
        SentimentCategory::ALL.map(|category| {
            let share = if total == 0 {
                0.0
            } else {
                self.get(category) as f64 / total as f64
            };
            (category, share)
        })
    }
}

/// Everything the reports need to say about one topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub topic_id: usize,
    /// Top keywords from the topic's word distribution, weight descending.
    pub top_keywords: Vec<(String, f64)>,
    pub document_count: usize,
    /// None when no document was assigned to this topic.
    pub mean_sentiment: Option<f64>,
    pub categories: CategoryCounts,
}

/// The aggregated view of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    /// One entry per topic, ascending id — including topics no document
    /// landed in (their keyword rows are still wanted).
    pub topics: Vec<TopicSummary>,
    /// Category counts over all topic-assigned documents.
    pub overall: CategoryCounts,
    pub assigned_count: usize,
    pub unassigned_count: usize,
}

impl CorpusReport {
    /// Topics at least one document was assigned to.
    pub fn populated_topics(&self) -> impl Iterator<Item = &TopicSummary> {
        self.topics.iter().filter(|t| t.document_count > 0)
    }
}

/// Fold the classified, scored documents into per-topic summaries.
///
/// `top_keywords` comes from the fitted model (one entry per topic) and
/// fixes the number of topics.
pub fn aggregate(documents: &[Document], top_keywords: Vec<Vec<(String, f64)>>) -> CorpusReport {
    let num_topics = top_keywords.len();
    let mut counts = vec![0usize; num_topics];
    let mut score_sums = vec![0.0f64; num_topics];
    let mut categories = vec![CategoryCounts::default(); num_topics];
    let mut overall = CategoryCounts::default();
    let mut unassigned_count = 0usize;

    for doc in documents {
        match doc.topic {
            Some(topic) if topic < num_topics => {
                counts[topic] += 1;
                score_sums[topic] += doc.sentiment_score;
                categories[topic].add(doc.sentiment_category);
                overall.add(doc.sentiment_category);
            }
            _ => unassigned_count += 1,
        }
    }

    let topics = top_keywords
        .into_iter()
        .enumerate()
        .map(|(topic_id, top_keywords)| TopicSummary {
            topic_id,
            top_keywords,
            document_count: counts[topic_id],
            mean_sentiment: if counts[topic_id] > 0 {
                Some(score_sums[topic_id] / counts[topic_id] as f64)
            } else {
                None
            },
            categories: categories[topic_id],
        })
        .collect();

    let assigned_count = counts.iter().sum();

    CorpusReport {
        topics,
        overall,
        assigned_count,
        unassigned_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: usize, score: f64, category: SentimentCategory, topic: Option<usize>) -> Document {
        let mut d = Document::new(id, format!("doc {id}"));
        d.sentiment_score = score;
        d.sentiment_category = category;
        d.topic = topic;
        d
    }

    fn keywords(k: usize) -> Vec<Vec<(String, f64)>> {
        (0..k)
            .map(|t| vec![(format!("kw{t}"), 0.5), (format!("kw{t}b"), 0.25)])
            .collect()
    }

    #[test]
    fn groups_by_topic_and_excludes_unassigned() {
        let docs = vec![
            doc(0, 0.9, SentimentCategory::Positive, Some(0)),
            doc(1, 0.1, SentimentCategory::Negative, Some(0)),
            doc(2, 0.5, SentimentCategory::Neutral, Some(1)),
            doc(3, 0.5, SentimentCategory::Unknown, None),
        ];
        let report = aggregate(&docs, keywords(2));

        assert_eq!(report.assigned_count, 3);
        assert_eq!(report.unassigned_count, 1);
        assert_eq!(report.topics[0].document_count, 2);
        assert!((report.topics[0].mean_sentiment.unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(report.topics[0].categories.positive, 1);
        assert_eq!(report.topics[0].categories.negative, 1);
        assert_eq!(report.topics[1].document_count, 1);
        assert_eq!(report.overall.unknown, 0, "unassigned docs never reach overall");
    }

    #[test]
    fn empty_topics_keep_their_keyword_rows() {
        let docs = vec![doc(0, 0.8, SentimentCategory::Positive, Some(0))];
        let report = aggregate(&docs, keywords(3));
        assert_eq!(report.topics.len(), 3);
        assert_eq!(report.topics[2].document_count, 0);
        assert_eq!(report.topics[2].mean_sentiment, None);
        assert_eq!(report.topics[2].top_keywords[0].0, "kw2");
        assert_eq!(report.populated_topics().count(), 1);
    }

    #[test]
    fn proportions_sum_to_one_with_zero_categories_present() {
        let mut counts = CategoryCounts::default();
        counts.add(SentimentCategory::Positive);
        counts.add(SentimentCategory::Positive);
        counts.add(SentimentCategory::Negative);

        let props = counts.proportions();
        assert_eq!(props.len(), 4, "zero-count categories are present, not omitted");
        let sum: f64 = props.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        let neutral = props
            .iter()
            .find(|(c, _)| *c == SentimentCategory::Neutral)
            .unwrap();
        assert_eq!(neutral.1, 0.0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let docs = vec![
            doc(0, 0.9, SentimentCategory::Positive, Some(1)),
            doc(1, 0.2, SentimentCategory::Negative, Some(0)),
            doc(2, 0.5, SentimentCategory::Neutral, Some(1)),
        ];
        let a = aggregate(&docs, keywords(2));
        let b = aggregate(&docs, keywords(2));
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }

    #[test]
    fn empty_group_proportions_are_all_zero() {
        let counts = CategoryCounts::default();
        assert!(counts.proportions().iter().all(|(_, p)| *p == 0.0));
    }
}
