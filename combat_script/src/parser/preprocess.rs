/// A normalized script line plus the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the original text.
    pub number: usize,
    /// Trimmed, lower-cased content.
    pub text: String,
}

impl ScriptLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Normalize raw script text: drop blank lines and `#` / `//` comments,
/// trim and lower-case what remains.
pub fn preprocess(source: &str) -> Vec<ScriptLine> {
    preprocess_lines(source.lines())
}

/// Line-sequence form of [`preprocess`].
pub fn preprocess_lines<I, S>(lines: I) -> Vec<ScriptLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                None
            } else {
                Some(ScriptLine::new(idx + 1, line.to_lowercase()))
            }
        })
        .collect()
}
