use anyhow::Result;
use boolsearch_core::corpus::{list_files, read_tokens};
use boolsearch_core::Set;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// A word compared without regard to ASCII case.
#[derive(Debug, Clone)]
pub struct Word(String);

impl Word {
    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Word {}

impl PartialOrd for Word {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Word {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

pub struct Verdict {
    pub path: PathBuf,
    pub spam_words: usize,
}

impl Verdict {
    pub fn is_spam(&self) -> bool {
        self.spam_words > 0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_spam() { "SPAM" } else { "Not spam" };
        write!(f, "{}: {} spam word(s) -> {}", self.path.display(), self.spam_words, label)
    }
}

fn word_set(tokens: Vec<String>) -> Set<Word> {
    tokens.into_iter().map(Word).collect()
}

/// Words present in every spam sample and in no non-spam sample.
pub fn build_filter(spam: &[Set<Word>], nonspam: &[Set<Word>]) -> Set<Word> {
    let mut samples = spam.iter();
    let Some(first) = samples.next() else {
        return Set::new();
    };
    let common = samples.fold(first.clone(), |acc, s| acc.intersection(s));
    let normal = nonspam.iter().fold(Set::new(), |acc: Set<Word>, s| acc.union(s));
    common.difference(&normal)
}

pub fn classify(filter: &Set<Word>, path: PathBuf, mail: &Set<Word>) -> Verdict {
    Verdict { path, spam_words: mail.intersection(filter).len() }
}

fn load_dir(dir: &Path) -> Result<Vec<(PathBuf, Set<Word>)>> {
    list_files(dir)?
        .into_iter()
        .map(|path| -> Result<(PathBuf, Set<Word>)> {
            let words = word_set(read_tokens(&path)?);
            Ok((path, words))
        })
        .collect()
}

pub fn run(spam_dir: &Path, nonspam_dir: &Path, mail_dir: &Path) -> Result<Vec<Verdict>> {
    let spam: Vec<Set<Word>> = load_dir(spam_dir)?.into_iter().map(|(_, s)| s).collect();
    let nonspam: Vec<Set<Word>> = load_dir(nonspam_dir)?.into_iter().map(|(_, s)| s).collect();
    let filter = build_filter(&spam, &nonspam);
    tracing::info!(spam = spam.len(), nonspam = nonspam.len(), filter_words = filter.len(), "built spam filter");

    Ok(load_dir(mail_dir)?
        .into_iter()
        .map(|(path, words)| classify(&filter, path, &words))
        .collect())
}
