//! Static landing surface content.

/// Product title shown on the landing surface.
pub const PRODUCT_TITLE: &str = "StudyAbroad AI Advisor";

/// Product tagline shown under the title.
pub const PRODUCT_TAGLINE: &str = "Your intelligent companion for studying abroad in USA, UK, Australia, and Canada. Get instant answers about admissions, visas, and immigration.";

/// A study destination highlighted on the landing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: &'static str,
    pub description: &'static str,
}

/// The four fixed destinations, in display order.
pub fn featured_destinations() -> Vec<Destination> {
    vec![
        Destination {
            name: "USA",
            description: "Navigate the American education system, F-1 visa process, and OPT opportunities.",
        },
        Destination {
            name: "UK",
            description: "Understand Tier 4 visas, Russell Group universities, and post-study work options.",
        },
        Destination {
            name: "Australia",
            description: "Learn about student visas, top universities, and graduate work rights.",
        },
        Destination {
            name: "Canada",
            description: "Explore study permits, college options, and post-graduation work permits.",
        },
    ]
}
