//! Specialist Routing
//!
//! The four specialists of the quoting desk and a deterministic keyword
//! classifier that picks one for a request.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
    RoutePlanner,
    CostAnalyst,
    DocumentSpecialist,
    QuoteManager,
}

// Checked in this order; the first list with a hit wins. ASCII keywords
// match whole words (plus a plural or past-tense ending); the Japanese ones
// match anywhere in the text.
const QUOTE_KEYWORDS: &[&str] = &[
    "save", "store", "keep", "history", "customer", "保存", "記録", "履歴",
];
const DOCUMENT_KEYWORDS: &[&str] = &[
    "document", "documentation", "customs", "hs code", "regulation", "checklist", "invoice",
    "certificate", "prohibited", "restricted", "incoterm", "書類", "通関", "規制",
];
const COST_KEYWORDS: &[&str] = &[
    "cost", "price", "pricing", "quote", "rate", "how much", "landed", "duty", "duties",
    "compare", "comparison", "budget", "費用", "料金", "見積", "運賃",
];
const ROUTE_KEYWORDS: &[&str] = &[
    "route", "routing", "transport", "transportation", "ship", "shipping", "shipment", "sea",
    "air", "carrier", "transit", "vessel", "flight", "mode", "ルート", "航路", "輸送",
];

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// `word` is `stem` or `stem` with an "s", "es", "d" or "ed" ending
fn inflection_of(word: &str, stem: &str) -> bool {
    word.strip_prefix(stem)
        .is_some_and(|rest| matches!(rest, "" | "s" | "es" | "d" | "ed"))
}

fn keyword_hit(text: &str, text_words: &[&str], keyword: &str) -> bool {
    if !keyword.is_ascii() {
        return text.contains(keyword);
    }

    let parts = words(keyword);
    let Some((last, leading)) = parts.split_last() else {
        return false;
    };
    text_words.windows(parts.len()).any(|window| {
        window[..leading.len()] == *leading && inflection_of(window[leading.len()], last)
    })
}

impl Specialist {
    pub const ALL: [Specialist; 4] = [
        Specialist::RoutePlanner,
        Specialist::CostAnalyst,
        Specialist::DocumentSpecialist,
        Specialist::QuoteManager,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Specialist::RoutePlanner => "route_planner",
            Specialist::CostAnalyst => "cost_analyst",
            Specialist::DocumentSpecialist => "document_specialist",
            Specialist::QuoteManager => "quote_manager",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Specialist::RoutePlanner => {
                "Finds sea and air routes and recommends a transport mode."
            }
            Specialist::CostAnalyst => {
                "Calculates sea and air freight, landed cost, and compares options."
            }
            Specialist::DocumentSpecialist => {
                "Lists shipping documents, customs regulations, HS codes and checklists."
            }
            Specialist::QuoteManager => "Saves and retrieves quotes and customer information.",
        }
    }

    /// Tools this specialist may call
    pub fn tool_names(&self) -> &'static [&'static str] {
        match self {
            Specialist::RoutePlanner => &[
                "search_sea_routes",
                "search_air_routes",
                "recommend_transport_mode",
            ],
            Specialist::CostAnalyst => &[
                "calculate_sea_freight_cost",
                "calculate_air_freight_cost",
                "calculate_total_landed_cost",
                "compare_shipping_options",
            ],
            Specialist::DocumentSpecialist => &[
                "get_required_documents",
                "check_customs_regulations",
                "get_hs_code_info",
                "generate_shipping_checklist",
            ],
            Specialist::QuoteManager => &[
                "save_quote",
                "get_quote_history",
                "save_customer_info",
                "get_customer_info",
            ],
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Specialist::RoutePlanner => ROUTE_PLANNER_PROMPT,
            Specialist::CostAnalyst => COST_ANALYST_PROMPT,
            Specialist::DocumentSpecialist => DOCUMENT_SPECIALIST_PROMPT,
            Specialist::QuoteManager => QUOTE_MANAGER_PROMPT,
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Specialist::QuoteManager => QUOTE_KEYWORDS,
            Specialist::DocumentSpecialist => DOCUMENT_KEYWORDS,
            Specialist::CostAnalyst => COST_KEYWORDS,
            Specialist::RoutePlanner => ROUTE_KEYWORDS,
        }
    }

    /// Pick the specialist for a request; `None` when no keyword matches
    pub fn classify(text: &str) -> Option<Specialist> {
        let text = text.to_lowercase();
        let text_words = words(&text);

        [
            Specialist::QuoteManager,
            Specialist::DocumentSpecialist,
            Specialist::CostAnalyst,
            Specialist::RoutePlanner,
        ]
        .into_iter()
        .find(|s| s.keywords().iter().any(|k| keyword_hit(&text, &text_words, k)))
    }

    pub fn from_name(name: &str) -> Option<Specialist> {
        Self::ALL.into_iter().find(|s| s.name() == name.trim())
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const ROUTE_PLANNER_PROMPT: &str = r#"You are a Route Planning Specialist for international logistics.

When asked about routes:
1. Use search_sea_routes and/or search_air_routes
2. Use recommend_transport_mode to suggest the best option
3. Present routes clearly with transit times and carriers"#;

const COST_ANALYST_PROMPT: &str = r#"You are a Cost Analysis Specialist for international logistics.

When asked about costs:
1. Use calculate_sea_freight_cost or calculate_air_freight_cost
2. Use calculate_total_landed_cost for the complete cost including duty and VAT
3. Use compare_shipping_options to show all options side by side

Always show the itemized breakdown and the validity period."#;

const DOCUMENT_SPECIALIST_PROMPT: &str = r#"You are a Documentation and Customs Specialist.

When asked about documents or customs:
1. Use get_required_documents for document lists
2. Use check_customs_regulations for import rules
3. Use get_hs_code_info for tariff classification
4. Use generate_shipping_checklist for preparation guides"#;

const QUOTE_MANAGER_PROMPT: &str = r#"You are a Quote Management Specialist.

Save quotes and manage customer information:
1. save_quote - save a shipping quote (customer_id, origin, destination, cargo_desc, total_cost, transport_mode)
2. get_quote_history - past quotes, optionally for one customer
3. save_customer_info - save a customer preference
4. get_customer_info - retrieve stored customer information

Always save when asked."#;
