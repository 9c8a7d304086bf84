// Topic modeling — TF-IDF features, NMF factorization, topic labeling,
// and relevance scoring. This is the algorithmic core of the pipeline.

pub mod features;
pub mod labels;
pub mod nmf;
pub mod relevance;

pub use features::{extract_features, TfidfParams, TfidfVectorizer};
pub use labels::{label_topics, TopicSummary};
pub use nmf::factorize;
pub use relevance::{score_relevance, RelevanceSpec};
