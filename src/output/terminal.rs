// Colored terminal output for topic reports.
//
// This is a review surface for a human, not a machine-parsed format.
// The weights printed are percentages of each topic's retained top-term
// mass, descending.

use colored::Colorize;

use crate::topics::labels::TopicSummary;

/// Print every topic's term report.
pub fn print_topics(summaries: &[TopicSummary]) {
    for (i, summary) in summaries.iter().enumerate() {
        print_topic(i, summary);
    }
}

/// Print one topic's terms with their percentage weights.
pub fn print_topic(index: usize, summary: &TopicSummary) {
    println!("{}", format!("Topic #{index}").bold());
    if summary.terms.is_empty() {
        println!("  {}", "(no terms with weight)".dimmed());
    }
    for (term, pct) in &summary.terms {
        println!("  {:>6.2}  {}", pct, term);
    }
    println!();
}
