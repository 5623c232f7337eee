//! Taxonomy inspection commands.

use color_eyre::Result;

use crate::models::TopicCategory;
use crate::services::{canonicalize, TOPIC_RULES};

use super::App;

impl App {
    /// Print every category with its slug and keywords.
    pub fn run_topics(&self) -> Result<()> {
        for category in TopicCategory::all() {
            println!("{} ({})", category.label(), category.slug());
            if self.verbose {
                let keywords = TOPIC_RULES
                    .iter()
                    .filter(|rule| rule.category == *category)
                    .flat_map(|rule| rule.keywords.iter().chain(rule.words).copied())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("    {}", keywords);
            }
        }
        Ok(())
    }

    /// Print the canonical category for each phrase.
    pub fn run_canonicalize(&self, phrases: &[String]) -> Result<()> {
        for phrase in phrases {
            match canonicalize(phrase) {
                Some(category) => println!("{}\t{}", phrase, category.label()),
                None => println!("{}\t-", phrase),
            }
        }
        Ok(())
    }
}
