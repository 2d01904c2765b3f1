//! Smart model routing.
//!
//! Maps a prompt plus two preference flags to a hosted model id using an
//! ordered rule table; first match wins. The real-time rule is evaluated
//! before the cost/latency preferences: only one provider has live
//! social-data access, and a cheaper or faster model would answer such a
//! prompt with stale or fabricated data.
//!
//! ## Design
//! - Explicit `(matcher, model)` rule table so precedence is structural,
//!   not an accident of `if` ordering
//! - Pure and total: every prompt resolves to a model, the last rule
//!   always matches
//! - `requires_realtime_data` is exposed on its own so callers can set the
//!   live-search flag on the outgoing request after routing

use std::sync::LazyLock;

use regex::Regex;

// ── Model ids ────────────────────────────────────────────────────

/// Opaque model identifier as accepted by the BlockRun API.
pub type ModelId = &'static str;

/// The only model with live X/Twitter data access.
pub const REALTIME_MODEL: ModelId = "xai/grok-3";
/// Cost-optimized model for `--cheap`.
pub const CHEAP_MODEL: ModelId = "deepseek/deepseek-chat";
/// Low-latency model for `--fast`.
pub const FAST_MODEL: ModelId = "openai/gpt-4o-mini";
/// Coding and debugging work.
pub const CODING_MODEL: ModelId = "anthropic/claude-sonnet-4";
/// Mathematical and logical reasoning.
pub const REASONING_MODEL: ModelId = "openai/o1-mini";
/// Long-document analysis and summarization.
pub const LONG_CONTEXT_MODEL: ModelId = "google/gemini-2.0-flash";
/// General-purpose default.
pub const DEFAULT_MODEL: ModelId = "openai/gpt-4o";
/// Default image-generation model.
pub const DEFAULT_IMAGE_MODEL: ModelId = "google/nano-banana";

// ── Keyword tables ───────────────────────────────────────────────

/// Prompts that need live social/news data: the platform itself, trending
/// content, public figures tied to it, and breaking-news phrasing.
const REALTIME_PATTERNS: &[&str] = &[
    "twitter",
    "x.com",
    "tweet",
    "trending",
    "elon",
    "musk",
    "breaking news",
    "latest news",
    "what people are saying",
    "what are people saying",
];

/// Programming and debugging prompts.
const CODING_PATTERNS: &[&str] = &["code", "python", "javascript", "function", "debug"];

/// Mathematical / logical-proof prompts.
const REASONING_PATTERNS: &[&str] = &[
    "math",
    "proof",
    "prove",
    "theorem",
    "logic",
    "reasoning",
    "solve",
];

/// Long-document and summarization prompts.
const LONG_CONTEXT_PATTERNS: &[&str] = &["long", "document", "summarize", "analyze file"];

/// `@handle` mention: an `@` followed by word characters where the `@` is
/// not itself preceded by a word character. `\B` sits between two non-word
/// characters (or start-of-string and a non-word character), so `@sama`
/// matches while the `@` in `user@example.com` does not.
static HANDLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@\w+").expect("handle mention pattern is valid"));

// ── Rule table ───────────────────────────────────────────────────

/// How a single rule decides whether it applies.
enum RouteMatcher {
    /// Prompt needs live social/news data; dominates the preference flags.
    Realtime,
    /// `--cheap` was requested.
    CheapFlag,
    /// `--fast` was requested. Ordered after [`RouteMatcher::CheapFlag`],
    /// so cheap wins when both flags are set.
    FastFlag,
    /// Case-insensitive substring match against a keyword set.
    Topic(&'static [&'static str]),
    /// Always matches.
    Fallback,
}

/// One routing rule: a matcher plus the model it selects.
struct RouteRule {
    matcher: RouteMatcher,
    model: ModelId,
}

/// Evaluation order is the precedence order. First match wins.
const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        matcher: RouteMatcher::Realtime,
        model: REALTIME_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::CheapFlag,
        model: CHEAP_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::FastFlag,
        model: FAST_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::Topic(CODING_PATTERNS),
        model: CODING_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::Topic(REASONING_PATTERNS),
        model: REASONING_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::Topic(LONG_CONTEXT_PATTERNS),
        model: LONG_CONTEXT_MODEL,
    },
    RouteRule {
        matcher: RouteMatcher::Fallback,
        model: DEFAULT_MODEL,
    },
];

impl RouteMatcher {
    fn matches(&self, lower: &str, realtime: bool, cheap: bool, fast: bool) -> bool {
        match self {
            RouteMatcher::Realtime => realtime,
            RouteMatcher::CheapFlag => cheap,
            RouteMatcher::FastFlag => fast,
            RouteMatcher::Topic(patterns) => patterns.iter().any(|p| lower.contains(p)),
            RouteMatcher::Fallback => true,
        }
    }
}

// ── Public API ───────────────────────────────────────────────────

/// Whether a prompt's correct answer depends on live, rapidly changing
/// external data. Callers use this after routing to enable the provider's
/// live-search capability when the chosen model supports it.
pub fn requires_realtime_data(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    REALTIME_PATTERNS.iter().any(|p| lower.contains(p)) || HANDLE_MENTION.is_match(prompt)
}

/// Whether a model can take the live-search flag.
pub fn supports_live_search(model: &str) -> bool {
    model.starts_with("xai/")
}

/// Select the model for a prompt and preference flags.
///
/// Pure and total: walks [`ROUTE_RULES`] in order and returns the first
/// match; the table ends with a rule that always matches.
pub fn select_model(prompt: &str, cheap: bool, fast: bool) -> ModelId {
    let lower = prompt.to_lowercase();
    let realtime = requires_realtime_data(prompt);

    if cheap && fast && !realtime {
        tracing::warn!("--cheap and --fast both set; cost preference takes precedence");
    }

    ROUTE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&lower, realtime, cheap, fast))
        .map(|rule| rule.model)
        .unwrap_or(DEFAULT_MODEL)
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_mention_detected() {
        assert!(requires_realtime_data("what is @sama posting about"));
        assert!(requires_realtime_data("@karpathy thread on compilers"));
        assert!(requires_realtime_data("summarize replies to @nasa"));
    }

    #[test]
    fn email_address_is_not_a_mention() {
        assert!(!requires_realtime_data(
            "draft an email to user@example.com about the invoice"
        ));
        assert!(!requires_realtime_data("contact support@help.example.org"));
    }

    #[test]
    fn realtime_keywords_detected_case_insensitive() {
        assert!(requires_realtime_data("what's TRENDING today"));
        assert!(requires_realtime_data("Breaking News about the launch"));
        assert!(requires_realtime_data("what people are saying about the keynote"));
    }

    #[test]
    fn plain_prompt_is_not_realtime() {
        assert!(!requires_realtime_data("explain how rainbows form"));
        assert!(!requires_realtime_data(""));
    }

    #[test]
    fn realtime_override_dominates_preferences() {
        assert_eq!(
            select_model("what's trending on twitter", true, true),
            REALTIME_MODEL
        );
        assert_eq!(select_model("summarize @nasa's feed", true, false), REALTIME_MODEL);
        assert_eq!(select_model("elon musk latest", false, true), REALTIME_MODEL);
    }

    #[test]
    fn cheap_flag_selects_cost_model() {
        assert_eq!(select_model("write a haiku", true, false), CHEAP_MODEL);
    }

    #[test]
    fn cheap_takes_precedence_over_fast() {
        assert_eq!(select_model("write a haiku", true, true), CHEAP_MODEL);
    }

    #[test]
    fn fast_flag_selects_latency_model() {
        assert_eq!(select_model("write a haiku", false, true), FAST_MODEL);
    }

    #[test]
    fn coding_prompt_routes_to_coding_model() {
        assert_eq!(
            select_model("debug this python function", false, false),
            CODING_MODEL
        );
    }

    #[test]
    fn reasoning_prompt_routes_to_reasoning_model() {
        assert_eq!(select_model("prove this theorem", false, false), REASONING_MODEL);
        assert_eq!(
            select_model("solve for x in this equation", false, false),
            REASONING_MODEL
        );
    }

    #[test]
    fn long_document_prompt_routes_to_long_context_model() {
        assert_eq!(
            select_model("summarize this report for me", false, false),
            LONG_CONTEXT_MODEL
        );
    }

    #[test]
    fn coding_checked_before_reasoning() {
        // Matches both keyword sets; the coding rule sits earlier.
        assert_eq!(
            select_model("debug the logic in this python script", false, false),
            CODING_MODEL
        );
    }

    #[test]
    fn empty_prompt_falls_through_to_default() {
        assert_eq!(select_model("", false, false), DEFAULT_MODEL);
    }

    #[test]
    fn unclassified_prompt_falls_through_to_default() {
        assert_eq!(select_model("tell me about otters", false, false), DEFAULT_MODEL);
    }

    #[test]
    fn live_search_support_is_provider_scoped() {
        assert!(supports_live_search(REALTIME_MODEL));
        assert!(!supports_live_search(DEFAULT_MODEL));
        assert!(!supports_live_search(CHEAP_MODEL));
    }
}
