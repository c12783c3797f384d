use std::sync::Arc;

use crate::category::{
    CategorySource, BREAKFAST_SANDWICHES, COLD_BEVERAGES, DONUTS_AND_BAKERY, SIGNATURE_LATTES,
};

/// Name fragments that mark an item as an add-on.
pub const EXTRAS_KEYWORDS: &[&str] = &[
    "flavor swirl",
    "whipped cream",
    "extra espresso shot",
    "extra shot",
];

const ALLOWED_EXTRA_CATEGORIES: &[&str] = &[SIGNATURE_LATTES, COLD_BEVERAGES];
const BLOCKED_EXTRA_CATEGORIES: &[&str] = &[DONUTS_AND_BAKERY, BREAKFAST_SANDWICHES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Nothing in the order can take an extra.
    NoEligibleBase,
    /// The order holds donuts or breakfast sandwiches, which never take extras.
    BlockedBase,
}

impl DenyReason {
    pub fn apology(self) -> &'static str {
        match self {
            DenyReason::NoEligibleBase => {
                "I can add extras to signature lattes or cold beverages, but not to donuts or breakfast sandwiches."
            }
            DenyReason::BlockedBase => {
                "I can add extras to signature lattes or cold beverages, but I can't add them to donuts or breakfast sandwiches."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrasDecision {
    Allow,
    Deny(DenyReason),
}

/// Gate for add-on items: an extra needs a signature latte or cold beverage in the order.
#[derive(Clone)]
pub struct ExtrasPolicy {
    categories: Arc<dyn CategorySource>,
}

impl ExtrasPolicy {
    pub fn new(categories: Arc<dyn CategorySource>) -> Self {
        Self { categories }
    }

    pub fn is_extra(item_name: &str) -> bool {
        let normalized = item_name.to_lowercase();
        EXTRAS_KEYWORDS.iter().any(|kw| normalized.contains(kw))
    }

    /// Lowercase category for `item_name`, or `""` when neither source knows it.
    pub fn infer_category(&self, item_name: &str) -> String {
        self.categories.category_of(item_name).unwrap_or_default()
    }

    /// Decides whether `candidate` may be added to an order holding `items`.
    ///
    /// Only meaningful for extras; callers check [`ExtrasPolicy::is_extra`] first.
    pub fn evaluate<'a>(
        &self,
        items: impl IntoIterator<Item = &'a str>,
        candidate: &str,
    ) -> ExtrasDecision {
        let mut has_blocked_base = false;
        for item in items {
            let category = self.infer_category(item);
            if ALLOWED_EXTRA_CATEGORIES.contains(&category.as_str()) {
                return ExtrasDecision::Allow;
            }
            has_blocked_base |= BLOCKED_EXTRA_CATEGORIES.contains(&category.as_str());
        }

        log::debug!("No eligible base for extra '{candidate}'");
        if has_blocked_base {
            ExtrasDecision::Deny(DenyReason::BlockedBase)
        } else {
            ExtrasDecision::Deny(DenyReason::NoEligibleBase)
        }
    }
}
