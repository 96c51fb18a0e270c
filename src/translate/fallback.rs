use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use super::interface::TranslationRequest;
use super::languages::display_name;

const DETECTED_LANGUAGE: &str = "detected language";

struct WordSwap {
    hello: &'static str,
    world: &'static str,
}

fn word_swap(target_lang: &str) -> Option<WordSwap> {
    match target_lang {
        "es" => Some(WordSwap { hello: "hola", world: "mundo" }),
        "fr" => Some(WordSwap { hello: "bonjour", world: "monde" }),
        "de" => Some(WordSwap { hello: "hallo", world: "welt" }),
        _ => None,
    }
}

fn hello_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)hello").unwrap())
}

fn world_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)world").unwrap())
}

fn source_name(source_lang: &str, auto_detect: bool) -> &str {
    if auto_detect {
        DETECTED_LANGUAGE
    } else {
        display_name(source_lang).unwrap_or(source_lang)
    }
}

/// Build the placeholder shown when the remote service is unavailable.
///
/// This is not a translation: a handful of words are swapped for the
/// Spanish, French and German targets and every other target gets the text
/// reversed. Output depends only on the request.
pub fn generate_fallback(request: &TranslationRequest) -> String {
    let source = source_name(request.source_lang(), request.is_auto_detect());
    let target_lang = request.target_lang();
    let target = display_name(target_lang).unwrap_or(target_lang);

    let mut output = format!("[Simulated translation from {} to {}]\n\n", source, target);

    let text = request.text();
    match word_swap(target_lang) {
        Some(swap) => {
            let replaced = hello_pattern().replace_all(text, NoExpand(swap.hello));
            let replaced = world_pattern().replace_all(&replaced, NoExpand(swap.world));
            output.push_str(&replaced);
        }
        None => output.extend(text.chars().rev()),
    }

    output
}
