//! Console report of enriched international events.
//!
//! This is program output (the run's human-readable summary), not logging;
//! it stays on stdout.

use colored::Colorize;

use nextree_analysis::TreeEdge;

fn country_or_dash(country: &Option<String>) -> &str {
    country.as_deref().unwrap_or("-")
}

pub fn print_international_events(events: &[TreeEdge]) {
    for event in events {
        let desc_count = event.desc_count.unwrap_or(0);
        let pct = event.total_proportion.unwrap_or(0.0) * 100.0;
        println!(
            "{} ({}) -> \t{} ({}): \t{} ({:.3} %)",
            event.parent_strain.bold(),
            country_or_dash(&event.parent_country),
            event.strain.bold(),
            country_or_dash(&event.country).green(),
            desc_count,
            pct,
        );
    }
    println!(
        "{} international events",
        events.len().to_string().bold()
    );
}
