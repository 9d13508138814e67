use crate::artifacts::core::error::DiffError;
use crate::artifacts::matcher::sequence_matcher::SequenceMatcher;
use std::cmp::Ordering;

/// Best "good enough" matches of `word` among `possibilities`
///
/// A possibility qualifies when its similarity to `word` reaches `cutoff`.
/// At most `n` results are returned, most similar first; equally similar
/// candidates are ordered by descending string value.
pub fn get_close_matches<'p, S>(
    word: &str,
    possibilities: &'p [S],
    n: usize,
    cutoff: f64,
) -> Result<Vec<&'p str>, DiffError>
where
    S: AsRef<str>,
{
    if n == 0 {
        return Err(DiffError::InvalidCount(n));
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(DiffError::InvalidCutoff(cutoff));
    }

    let word: Vec<char> = word.chars().collect();
    let candidates: Vec<(&str, Vec<char>)> = possibilities
        .iter()
        .map(|p| (p.as_ref(), p.as_ref().chars().collect()))
        .collect();

    // `word` stays on the b side so its index is built once.
    let mut matcher = SequenceMatcher::new(&[], &word);
    let mut scored: Vec<(f64, &'p str)> = Vec::new();
    for (text, chars) in &candidates {
        matcher.set_seq1(chars);
        if matcher.real_quick_ratio() >= cutoff
            && matcher.quick_ratio() >= cutoff
            && matcher.ratio() >= cutoff
        {
            scored.push((matcher.ratio(), *text));
        }
    }

    scored.sort_by(|(lscore, ltext), (rscore, rtext)| {
        rscore
            .partial_cmp(lscore)
            .unwrap_or(Ordering::Equal)
            .then_with(|| rtext.cmp(ltext))
    });
    scored.truncate(n);

    Ok(scored.into_iter().map(|(_, text)| text).collect())
}
