//! Rule-based replies used while no model is loaded.

use crate::text::normalize;

const GREETING_KEYWORDS: &[&str] = &["ሰላም", "ጤና ይስጥልኝ", "እንደምን", "selam", "hello"];
const HELP_KEYWORDS: &[&str] = &["እርዳታ", "እገዛ", "እርዳኝ", "help"];
const THANKS_KEYWORDS: &[&str] = &["አመሰግናለሁ", "አመሰግናለው", "እናመሰግናለን", "thank", "thanks"];

pub const GREETING_REPLY: &str = "ሰላም! እንዴት ልረዳዎት እችላለሁ?";
pub const HELP_REPLY: &str = "ስለ ማንኛውም ጉዳይ ጥያቄዎን በአማርኛ ይጻፉ፣ እኔም ለመመለስ እሞክራለሁ።";
pub const THANKS_REPLY: &str = "ምንም አይደለም! ሌላ ጥያቄ ካለዎት ይጠይቁ።";
pub const CLARIFY_REPLY: &str = "እባክዎ ጥያቄዎን በዝርዝር ይግለጹ።";

/// Canned reply for `text`.
///
/// Keyword checks run on the normalized, lower-cased text in priority order:
/// greeting, help, thanks, then very short input. Anything else gets a reply
/// quoting the original text and saying the model is not loaded.
pub fn fallback_reply(text: &str) -> String {
    let cleaned = normalize(text).to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| cleaned.contains(*k));

    if contains_any(GREETING_KEYWORDS) {
        GREETING_REPLY.to_string()
    } else if contains_any(HELP_KEYWORDS) {
        HELP_REPLY.to_string()
    } else if contains_any(THANKS_KEYWORDS) {
        THANKS_REPLY.to_string()
    } else if cleaned.chars().count() <= 2 {
        CLARIFY_REPLY.to_string()
    } else {
        echo_reply(text)
    }
}

fn echo_reply(original: &str) -> String {
    format!(
        "(demo) ሞዴሉ ገና አልተጫነም። ጥያቄዎን ተቀብያለሁ: \"{}\"",
        original
    )
}
