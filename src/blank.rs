//! Blank-line normalization.
//!
//! Collapses every run of blank lines strictly between two non-blank lines
//! down to a single empty line; leading and trailing blank runs disappear
//! entirely. Independent of the merge engine and stateless across calls.

/// Iterator adapter behind [`squeeze_blanks`] / [`squeeze_blanks_with`].
pub struct SqueezeBlanks<I, F> {
    lines: I,
    trim: F,
    seen_text: bool,
    blank_pending: bool,
    queued: Option<String>,
}

/// Squeeze runs of blank lines, taking lines as they are.
pub fn squeeze_blanks<I>(lines: I) -> SqueezeBlanks<I::IntoIter, fn(String) -> String>
where
    I: IntoIterator<Item = String>,
{
    squeeze_blanks_with(lines, |line| line)
}

/// Squeeze runs of blank lines, applying `trim` to every line first; a line
/// is blank when its trimmed form is empty. The trimmed form is what gets
/// yielded.
pub fn squeeze_blanks_with<I, F>(lines: I, trim: F) -> SqueezeBlanks<I::IntoIter, F>
where
    I: IntoIterator<Item = String>,
    F: Fn(String) -> String,
{
    SqueezeBlanks {
        lines: lines.into_iter(),
        trim,
        seen_text: false,
        blank_pending: false,
        queued: None,
    }
}

impl<I, F> Iterator for SqueezeBlanks<I, F>
where
    I: Iterator<Item = String>,
    F: Fn(String) -> String,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // A separator yield leaves the non-blank line that triggered it
        // queued for the following call.
        if let Some(queued) = self.queued.take() {
            return Some(queued);
        }
        loop {
            let line = (self.trim)(self.lines.next()?);
            if line.is_empty() {
                self.blank_pending = true;
                continue;
            }
            let separate = self.blank_pending && self.seen_text;
            self.blank_pending = false;
            self.seen_text = true;
            if separate {
                self.queued = Some(line);
                return Some(String::new());
            }
            return Some(line);
        }
    }
}
