// Latent topic modeling — trainer, fitted model, quality metrics.

pub mod evaluate;
pub mod lda;
pub mod model;

pub use evaluate::EvaluationMetrics;
pub use lda::{train, GibbsSampler, TrainConfig};
pub use model::TopicModel;
