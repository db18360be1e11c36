//! Keyword chatbot for the storefront help widget.
//!
//! The parser is a fixed, ordered rule table matched by case-insensitive
//! substring. The first rule with a matching keyword wins; anything else
//! gets the fallback reply pointing at the contact form.

use serde::Serialize;

/// A canned reply from the chatbot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotReply {
    /// Reply text.
    pub text: String,
    /// Optional suggested link (API path or storefront URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
    link: Option<&'static str>,
}

/// Rule order matters: more specific intents come first so "cancel my
/// order" hits the order rule, not the subscription one.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["order", "delivery", "shipping", "track"],
        reply: "You can follow your orders and their status from your account. \
                Orders page: account > orders.",
        link: Some("/api/orders"),
    },
    Rule {
        keywords: &["refund", "money back", "cancel"],
        reply: "Pending and paid orders can be cancelled from the order page; \
                refunds are issued to the original payment method within 5 business days.",
        link: None,
    },
    Rule {
        keywords: &["price", "pricing", "cost", "how much"],
        reply: "All prices are listed on the product pages, taxes included. \
                Have a look at our catalog.",
        link: Some("/api/products"),
    },
    Rule {
        keywords: &["subscription", "subscribe", "renewal"],
        reply: "Subscriptions renew automatically. You can cancel anytime from \
                your account; access remains until the end of the paid period.",
        link: Some("/api/subscriptions"),
    },
    Rule {
        keywords: &["password", "login", "sign in", "account"],
        reply: "If you cannot sign in, use the password reset link on the login \
                page. Verification emails can take a few minutes to arrive.",
        link: None,
    },
    Rule {
        keywords: &["human", "agent", "someone", "support"],
        reply: "Sure - send us a message through the contact form and our \
                support team will get back to you by email.",
        link: Some("/api/contact-messages"),
    },
];

const FALLBACK: &str = "I did not quite get that. You can ask me about orders, \
                        pricing, subscriptions, or your account - or reach our \
                        support team through the contact form.";

/// The storefront chatbot.
pub struct ChatbotService;

impl ChatbotService {
    /// Produce a reply for a visitor message.
    #[must_use]
    pub fn reply(message: &str) -> BotReply {
        let normalized = message.to_lowercase();

        for rule in RULES {
            if rule.keywords.iter().any(|k| normalized.contains(k)) {
                return BotReply {
                    text: rule.reply.to_owned(),
                    link: rule.link.map(ToOwned::to_owned),
                };
            }
        }

        BotReply {
            text: FALLBACK.to_owned(),
            link: Some("/api/contact-messages".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_keywords() {
        let reply = ChatbotService::reply("Where is my ORDER?");
        assert!(reply.text.contains("orders"));
        assert_eq!(reply.link.as_deref(), Some("/api/orders"));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(
            ChatbotService::reply("TRACK my package"),
            ChatbotService::reply("track my package")
        );
    }

    #[test]
    fn test_first_rule_wins() {
        // "cancel my order" contains keywords of both the order and refund
        // rules; the order rule is listed first.
        let reply = ChatbotService::reply("I want to cancel my order");
        assert_eq!(reply.link.as_deref(), Some("/api/orders"));
    }

    #[test]
    fn test_pricing_keywords() {
        let reply = ChatbotService::reply("how much does the EDR plan cost?");
        assert!(reply.text.contains("prices"));
    }

    #[test]
    fn test_human_handoff() {
        let reply = ChatbotService::reply("can I talk to a human please");
        assert_eq!(reply.link.as_deref(), Some("/api/contact-messages"));
    }

    #[test]
    fn test_fallback() {
        let reply = ChatbotService::reply("zzz unrelated gibberish");
        assert_eq!(reply.text, FALLBACK);
        assert_eq!(reply.link.as_deref(), Some("/api/contact-messages"));
    }
}
