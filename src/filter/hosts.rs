// src/filter/hosts.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Per-host override: some sites embed volatile content in their main
/// markup that the generic filter cannot isolate structurally, so we watch
/// a handful of stable tokens instead.
struct HostRule {
    host: &'static str,
    apply: fn(&str) -> Option<String>,
}

static HOST_RULES: &[HostRule] = &[HostRule {
    host: "web-ace.jp",
    apply: web_ace,
}];

/// Look up a custom rule by substring match of the URL against the host
/// table. Returns `None` when no rule exists or the rule produced nothing,
/// in which case the caller falls back to the generic filter.
pub(super) fn apply_host_rule(url: &str, body: &str) -> Option<String> {
    HOST_RULES
        .iter()
        .find(|rule| url.contains(rule.host))
        .and_then(|rule| (rule.apply)(body))
}

// Title tag, primary heading and the localized "updated on" date token;
// everything else on the page rotates too often to be a useful signal.
static WEB_ACE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<title[^>]*>(.*?)</title>",
        r"(?is)<h1[^>]*>(.*?)</h1>",
        r"(?i)更新日[：:]\s*(\d{4}[/\-]\d{2}[/\-]\d{2})",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

fn web_ace(body: &str) -> Option<String> {
    if WEB_ACE_PATTERNS.len() != 3 {
        return None;
    }

    let title = WEB_ACE_PATTERNS[0]
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let heading = WEB_ACE_PATTERNS[1]
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let updated = WEB_ACE_PATTERNS[2]
        .find(body)
        .map(|m| m.as_str().to_string());

    let parts: Vec<String> = [title, heading, updated].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}
