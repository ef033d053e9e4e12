use whatlang::{Lang, Script};

/// Any codepoint in the Han blocks (URO, extension A, compatibility).
pub fn contains_han(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}'
        )
    })
}

/// Whether the text is predominantly Chinese.
///
/// Fast path: any Han codepoint decides immediately without touching the
/// statistical model. Otherwise falls back to whatlang's dominant-language
/// guess. Empty or whitespace-only input is not classifiable and returns
/// `None`; callers skip classification for it.
pub fn is_chinese(text: &str) -> Option<bool> {
    if text.trim().is_empty() {
        return None;
    }

    if contains_han(text) {
        return Some(true);
    }

    let detected = whatlang::detect(text)
        .map(|info| info.lang() == Lang::Cmn || info.script() == Script::Mandarin)
        .unwrap_or(false);
    Some(detected)
}
