use once_cell::sync::Lazy;
use regex::Regex;

static SMALL_TALK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:hi+|hello+|hey+|sup|howdy|greetings|thanks?|thank you|bye|goodbye|ok|okay|yes|no|sure|great|nice|cool|wow|lol|haha)[!?. ]*$",
    )
    .expect("small talk pattern is valid")
});

/// True for greetings and acknowledgements that need no capability calls.
pub fn is_small_talk(question: &str) -> bool {
    SMALL_TALK.is_match(&question.trim().to_lowercase())
}
