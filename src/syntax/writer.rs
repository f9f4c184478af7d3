use crate::syntax::Sep;

/// Collects rendered fields into one logical line with single spaces between words.
#[derive(Debug, Default)]
pub struct Writer {
    words: Vec<String>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new word. Empty text is ignored.
    pub fn word(&mut self, text: &str) {
        if !text.is_empty() {
            self.words.push(text.to_string());
        }
    }

    /// Appends to the last word, or starts one if there is none.
    pub fn attach(&mut self, text: &str) {
        match self.words.last_mut() {
            Some(last) => last.push_str(text),
            None => self.word(text),
        }
    }

    pub fn push(&mut self, sep: Sep, text: &str) {
        match sep {
            Sep::Adjacent => self.attach(text),
            Sep::Space => self.word(text),
            Sep::Assign if self.words.is_empty() => self.word(text),
            Sep::Assign => self.attach(&format!("={text}")),
        }
    }

    pub fn finish(self) -> String {
        self.words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_render_canonically() {
        let mut out = Writer::new();
        out.word("imp");
        out.push(Sep::Adjacent, ":n");
        out.push(Sep::Assign, "1");
        out.push(Sep::Space, "vol");
        assert_eq!(out.finish(), "imp:n=1 vol");
    }
}
