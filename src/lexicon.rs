// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::Returns;

// a word list: utf-8 text, one lowercase word per line, stored verbatim.
pub struct Lexicon {
    pub words: Vec<String>,
}

impl Lexicon {
    // loads assets/<name>.txt relative to the working directory.
    pub fn load(name: &str) -> Returns<Lexicon> {
        let path = std::path::Path::new("assets").join(format!("{name}.txt"));
        let contents = std::fs::read_to_string(&path)?;
        Ok(Lexicon {
            words: contents.lines().map(str::to_string).collect(),
        })
    }

    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Lexicon {
        Lexicon {
            words: words.iter().map(|word| word.as_ref().to_string()).collect(),
        }
    }
}
