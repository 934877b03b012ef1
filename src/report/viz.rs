// Interactive topic-model visualization.
//
// A single self-contained HTML file: the fitted model is serialized to
// JSON and embedded next to a small inline script that renders a topic
// list and, per topic, a bar chart of its top terms. No network access,
// no external assets — the file can be opened from disk or attached to a
// report as-is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::CorpusReport;
use crate::text::Vocabulary;
use crate::topics::{EvaluationMetrics, TopicModel};

/// Terms shown per topic in the browser view.
const VIZ_TERMS: usize = 15;

#[derive(Serialize)]
struct VizPayload {
    generated_at: String,
    num_topics: usize,
    document_count: usize,
    coherence: f64,
    log_perplexity: f64,
    topics: Vec<VizTopic>,
}

#[derive(Serialize)]
struct VizTopic {
    id: usize,
    /// Mean share of this topic across all training documents.
    share: f64,
    document_count: usize,
    mean_sentiment: Option<f64>,
    terms: Vec<VizTerm>,
}

#[derive(Serialize)]
struct VizTerm {
    term: String,
    probability: f64,
}

fn build_payload(
    model: &TopicModel,
    vocab: &Vocabulary,
    metrics: &EvaluationMetrics,
    report: &CorpusReport,
) -> VizPayload {
    let k = model.num_topics();
    let num_docs = model.num_docs();

    // Mean θ per topic over the training corpus
    let mut shares = vec![0.0f64; k];
    for dist in model.doc_distributions() {
        for (t, &p) in dist.iter().enumerate() {
            shares[t] += p;
        }
    }
    if num_docs > 0 {
        for share in shares.iter_mut() {
            *share /= num_docs as f64;
        }
    }

    let top_terms = model.top_words(vocab, VIZ_TERMS);

    let topics = (0..k)
        .map(|t| VizTopic {
            id: t,
            share: shares[t],
            document_count: report.topics.get(t).map_or(0, |s| s.document_count),
            mean_sentiment: report.topics.get(t).and_then(|s| s.mean_sentiment),
            terms: top_terms[t]
                .iter()
                .map(|(term, probability)| VizTerm {
                    term: term.clone(),
                    probability: *probability,
                })
                .collect(),
        })
        .collect();

    VizPayload {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        num_topics: k,
        document_count: num_docs,
        coherence: metrics.coherence,
        log_perplexity: metrics.log_perplexity,
        topics,
    }
}

/// Write `topics.html` into the output directory.
pub fn write_viz(
    dir: &Path,
    model: &TopicModel,
    vocab: &Vocabulary,
    metrics: &EvaluationMetrics,
    report: &CorpusReport,
) -> Result<PathBuf> {
    let payload = build_payload(model, vocab, metrics, report);
    let json = serde_json::to_string(&payload)?;
    let html = TEMPLATE.replace("__PAYLOAD__", &json);

    let path = dir.join("topics.html");
    fs::write(&path, html).with_context(|| format!("cannot write viz {}", path.display()))?;
    Ok(path)
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Topic model</title>
<style>
  body { font-family: sans-serif; margin: 0; background: #FAFAFA; color: #222; }
  header { padding: 16px 24px; border-bottom: 1px solid #ddd; background: #fff; }
  header h1 { margin: 0 0 4px; font-size: 18px; }
  header .meta { color: #666; font-size: 13px; }
  main { display: flex; gap: 24px; padding: 24px; }
  #topic-list { width: 300px; }
  .topic-card { background: #fff; border: 1px solid #ddd; border-radius: 6px;
                padding: 10px 12px; margin-bottom: 8px; cursor: pointer; }
  .topic-card:hover { border-color: #0072B2; }
  .topic-card.active { border-color: #0072B2; box-shadow: 0 0 0 1px #0072B2; }
  .topic-card .share-bar { height: 6px; background: #eee; border-radius: 3px; margin-top: 6px; }
  .topic-card .share-fill { height: 6px; background: #0072B2; border-radius: 3px; }
  #detail { flex: 1; background: #fff; border: 1px solid #ddd; border-radius: 6px; padding: 16px 20px; }
  .term-row { display: flex; align-items: center; margin: 4px 0; font-size: 13px; }
  .term-label { width: 140px; text-align: right; padding-right: 10px; }
  .term-bar { height: 14px; background: #009E73; border-radius: 2px; }
  .term-prob { padding-left: 8px; color: #666; }
</style>
</head>
<body>
<header>
  <h1>Topic model</h1>
  <div class="meta" id="meta"></div>
</header>
<main>
  <div id="topic-list"></div>
  <div id="detail"></div>
</main>
<script>
const DATA = __PAYLOAD__;

const meta = document.getElementById("meta");
meta.textContent = DATA.num_topics + " topics over " + DATA.document_count +
  " documents — coherence " + DATA.coherence.toFixed(4) +
  ", log-perplexity " + DATA.log_perplexity.toFixed(4) +
  " — generated " + DATA.generated_at;

const list = document.getElementById("topic-list");
const detail = document.getElementById("detail");

function showTopic(topic) {
  document.querySelectorAll(".topic-card").forEach(function (el) {
    el.classList.toggle("active", Number(el.dataset.id) === topic.id);
  });
  const maxProb = Math.max.apply(null, topic.terms.map(function (t) { return t.probability; }));
  let html = "<h2>Topic " + topic.id + "</h2>";
  html += "<p>" + topic.document_count + " documents";
  if (topic.mean_sentiment !== null) {
    html += ", mean sentiment " + topic.mean_sentiment.toFixed(3);
  }
  html += ", corpus share " + (topic.share * 100).toFixed(1) + "%</p>";
  topic.terms.forEach(function (t) {
    const width = maxProb > 0 ? (t.probability / maxProb) * 420 : 0;
    html += '<div class="term-row"><span class="term-label">' + t.term + "</span>" +
      '<span class="term-bar" style="width:' + width.toFixed(1) + 'px"></span>' +
      '<span class="term-prob">' + t.probability.toFixed(4) + "</span></div>";
  });
  detail.innerHTML = html;
}

DATA.topics.forEach(function (topic) {
  const card = document.createElement("div");
  card.className = "topic-card";
  card.dataset.id = topic.id;
  const words = topic.terms.slice(0, 4).map(function (t) { return t.term; }).join(", ");
  card.innerHTML = "<strong>Topic " + topic.id + "</strong> — " + words +
    '<div class="share-bar"><div class="share-fill" style="width:' +
    (topic.share * 100).toFixed(1) + '%"></div></div>';
  card.addEventListener("click", function () { showTopic(topic); });
  list.appendChild(card);
});

if (DATA.topics.length > 0) {
  showTopic(DATA.topics[0]);
}
</script>
</body>
</html>
"#;
