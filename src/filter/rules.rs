// src/filter/rules.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered (pattern, replacement) pairs applied by the generic filter.
///
/// The first group strips script blocks for known analytics, ad and
/// tracking vendors, ad containers, per-request tokens, embedded datetime
/// literals, noscript blocks and comments. The trailing pair of rules then
/// normalizes whitespace so formatting churn does not shift the hash.
const REPLACEMENTS: &[(&str, &str)] = &[
    // Google Analytics / Tag Manager
    (r"(?is)<script[^>]*gtag[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*googletagmanager[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*analytics[^>]*>.*?</script>", ""),
    // Ad networks
    (r"(?is)<script[^>]*adingo[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*doubleclick[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*googlesyndication[^>]*>.*?</script>", ""),
    (r#"(?is)<div[^>]*class="[^"]*ad[^"]*"[^>]*>.*?</div>"#, ""),
    // Tracking vendors
    (r"(?is)<script[^>]*criteo[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*bidswitch[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*nakanohito[^>]*>.*?</script>", ""),
    (r"(?is)<script[^>]*yahoo[^>]*>.*?</script>", ""),
    // Per-request tokens
    (r#"(?i)data-timestamp="[^"]*""#, ""),
    (r#"(?i)data-session="[^"]*""#, ""),
    (r"(?i)\?t=\d+", ""),
    (r"(?i)\?v=\d+", ""),
    // Embedded datetime literals
    (r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}", ""),
    // Noise blocks
    (r"(?is)<noscript>.*?</noscript>", ""),
    (r"(?s)<!--.*?-->", ""),
    // Whitespace normalization
    (r"\s+", " "),
    (r">\s+<", "><"),
];

// Patterns that fail to compile are skipped rather than panicking.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    REPLACEMENTS
        .iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|re| (re, *replacement))
        })
        .collect()
});

/// Apply the generic noise filter. Total over any input: regex replacement
/// cannot fail, so the caller always gets text back.
pub fn apply_generic(body: &str) -> String {
    let mut text = body.to_string();
    for (re, replacement) in RULES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_compiles() {
        assert_eq!(RULES.len(), REPLACEMENTS.len());
    }

    #[test]
    fn test_strips_analytics_scripts() {
        let html = r#"<html><head><script src="https://www.googletagmanager.com/gtag/js"></script></head><body>Hello</body></html>"#;
        let filtered = apply_generic(html);
        assert!(!filtered.contains("googletagmanager"));
        assert!(filtered.contains("Hello"));
    }

    #[test]
    fn test_strips_ad_divs() {
        let html = r#"<body><div class="banner ad-slot"><img src="x.png"></div><p>Story</p></body>"#;
        let filtered = apply_generic(html);
        assert!(!filtered.contains("ad-slot"));
        assert!(filtered.contains("Story"));
    }

    #[test]
    fn test_strips_session_tokens_and_cache_busters() {
        let html = r#"<div data-session="f9a2" data-timestamp="1700000000"><a href="/style.css?v=12345">x</a></div>"#;
        let filtered = apply_generic(html);
        assert!(!filtered.contains("data-session"));
        assert!(!filtered.contains("data-timestamp"));
        assert!(!filtered.contains("?v=12345"));
    }

    #[test]
    fn test_strips_datetime_literals_and_comments() {
        let html = "<p>generated 2024-01-15 12:34:56</p><!-- build 9 --><noscript>enable js</noscript>";
        let filtered = apply_generic(html);
        assert!(!filtered.contains("12:34:56"));
        assert!(!filtered.contains("build 9"));
        assert!(!filtered.contains("enable js"));
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<div>\n   <p>a   b</p>\n </div>  ";
        assert_eq!(apply_generic(html), "<div><p>a b</p></div>");
    }

    #[test]
    fn test_idempotent_on_filtered_output() {
        let html = r#"<html>
            <head><script src="//cdn.doubleclick.net/x.js"></script></head>
            <body><div class="ad">buy</div><p>News   item</p><!-- ts --></body>
        </html>"#;
        let once = apply_generic(html);
        let twice = apply_generic(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_with_wide_datetime_separator() {
        // A date/time pair split by a whitespace run must go in the first
        // pass; otherwise the whitespace collapse manufactures a fresh
        // match for the next pass and the hash shifts between checks.
        let html = "a 2024-01-01  12:00:00 b";
        let once = apply_generic(html);
        let twice = apply_generic(&once);
        assert_eq!(once, "a b");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_total_on_malformed_html() {
        let truncated = "<div class=\"ad\"><script src=gtag ...";
        // No panic, and some text comes back.
        let filtered = apply_generic(truncated);
        assert!(!filtered.is_empty());
    }
}
